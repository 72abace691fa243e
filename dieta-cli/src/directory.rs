//! Worker directory loaded from the remote XLSX database
//!
//! The directory is one workbook; the first worksheet is the data source and
//! its first row is the header. One row per worker, keyed by DNI.

use std::collections::HashSet;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::error::{LoadError, LookupError};

/// Column headers as they appear in the upstream workbook
mod columns {
    pub const DNI: &str = "DNI";
    pub const WORKER_NAME: &str = "TRABAJADOR/A";
    pub const CENTER_ADDRESS: &str = "DIRECCIÓN CENTRO";
    pub const TEMPLATE_CATEGORY: &str = "MODELO DIETAS";
    pub const BUILDING_ALLOWANCE: &str = "INMUEBLE DIETAS";
    pub const ANALYTICS_ALLOWANCE: &str = "ANALÍTICA DIETAS";
    pub const AREA_ALLOWANCE: &str = "AREA DIETAS";
}

/// One worker row, string-rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRecord {
    pub dni: String,
    pub worker_name: String,
    pub center_address: String,
    /// Template-selector category; `None` when the cell is empty
    pub template_category: Option<String>,
    pub building_allowance: String,
    pub analytics_allowance: String,
    pub area_allowance: String,
}

/// All worker records, in file row order
#[derive(Debug, Clone)]
pub struct WorkerDirectory {
    records: Vec<WorkerRecord>,
}

impl WorkerDirectory {
    /// Parse the directory workbook from its raw bytes.
    pub fn load(bytes: Vec<u8>) -> Result<WorkerDirectory, LoadError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(LoadError::NoWorksheet)?;

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows.next().ok_or_else(|| LoadError::Empty {
            sheet: sheet_name.clone(),
        })?;

        let headers: Vec<String> = header_row.iter().map(cell_string).collect();
        let col = |name: &str| -> Result<usize, LoadError> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn {
                    sheet: sheet_name.clone(),
                    column: name.to_string(),
                })
        };

        let dni_col = col(columns::DNI)?;
        let name_col = col(columns::WORKER_NAME)?;
        let address_col = col(columns::CENTER_ADDRESS)?;
        let category_col = col(columns::TEMPLATE_CATEGORY)?;
        let building_col = col(columns::BUILDING_ALLOWANCE)?;
        let analytics_col = col(columns::ANALYTICS_ALLOWANCE)?;
        let area_col = col(columns::AREA_ALLOWANCE)?;

        let mut records = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for row in rows {
            let dni = cell_string_at(row, dni_col);
            if dni.is_empty() {
                continue;
            }

            // First row wins for a duplicated DNI; later rows are kept in the
            // list (file order) but never returned by lookup.
            if !seen.insert(dni.clone()) {
                log::warn!("duplicate DNI {} in worker directory, first row wins", dni);
            }

            let category = cell_string_at(row, category_col);
            records.push(WorkerRecord {
                dni,
                worker_name: cell_string_at(row, name_col),
                center_address: cell_string_at(row, address_col),
                template_category: (!category.is_empty()).then_some(category),
                building_allowance: cell_string_at(row, building_col),
                analytics_allowance: cell_string_at(row, analytics_col),
                area_allowance: cell_string_at(row, area_col),
            });
        }

        log::debug!("worker directory sheet: '{}'", sheet_name);

        Ok(WorkerDirectory { records })
    }

    /// Exact-match lookup by DNI; first matching row in file order.
    pub fn lookup(&self, dni: &str) -> Result<&WorkerRecord, LookupError> {
        self.records
            .iter()
            .find(|r| r.dni == dni)
            .ok_or_else(|| LookupError::NotFound {
                dni: dni.to_string(),
            })
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Render a cell as a string; whole-number floats lose the trailing ".0"
/// so numeric DNIs and allowances round-trip the way they are displayed.
fn cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Empty | Data::Error(_) => String::new(),
    }
}

fn cell_string_at(row: &[Data], col: usize) -> String {
    row.get(col).map(cell_string).unwrap_or_default()
}
