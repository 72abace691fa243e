//! Fill a diet template with worker fields and save the result
//!
//! The template is opened in place so its formatting survives; each mapped
//! cell keeps whatever the template already holds and gets the worker value
//! appended after a space. Appending (rather than overwriting) matches the
//! template layout, where the target cells carry label text.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::directory::WorkerRecord;
use crate::error::MergeError;

/// Fixed cell addresses on the template's active worksheet
mod cells {
    pub const WORKER_NAME: &str = "A9";
    pub const DNI: &str = "A10";
    pub const CENTER_ADDRESS: &str = "A11";
    pub const BUILDING_ALLOWANCE: &str = "B1";
    pub const ANALYTICS_ALLOWANCE: &str = "B2";
    pub const AREA_ALLOWANCE: &str = "B3";
}

/// One pending write: this value appended to this cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub address: &'static str,
    pub value: String,
}

/// Build the ordered cell/value table for one worker.
///
/// Every attribute has its own address; the plan is one-to-one and applied
/// in order, so no write can silently shadow another.
pub fn merge_plan(record: &WorkerRecord) -> Vec<CellWrite> {
    vec![
        CellWrite {
            address: cells::WORKER_NAME,
            value: record.worker_name.clone(),
        },
        CellWrite {
            address: cells::DNI,
            value: record.dni.clone(),
        },
        CellWrite {
            address: cells::CENTER_ADDRESS,
            value: record.center_address.clone(),
        },
        CellWrite {
            address: cells::BUILDING_ALLOWANCE,
            value: record.building_allowance.clone(),
        },
        CellWrite {
            address: cells::ANALYTICS_ALLOWANCE,
            value: record.analytics_allowance.clone(),
        },
        CellWrite {
            address: cells::AREA_ALLOWANCE,
            value: record.area_allowance.clone(),
        },
    ]
}

/// Apply the record's merge plan to a template and save the output document.
///
/// Returns the path of the saved file, `<output_dir>/Dieta_<DNI>.xlsx`. An
/// existing file at that path is overwritten.
pub fn merge(
    template_bytes: &[u8],
    record: &WorkerRecord,
    output_dir: &Path,
) -> Result<PathBuf, MergeError> {
    let plan = merge_plan(record);
    let mut book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(template_bytes), true)?;

    apply_writes(book.get_active_sheet_mut(), &plan)?;

    fs::create_dir_all(output_dir).map_err(|source| MergeError::CreateDir {
        dir: output_dir.to_path_buf(),
        source,
    })?;

    let output_path = output_dir.join(format!("Dieta_{}.xlsx", record.dni));
    umya_spreadsheet::writer::xlsx::write(&book, &output_path).map_err(|source| {
        MergeError::Save {
            path: output_path.clone(),
            source,
        }
    })?;

    log::info!("saved document {}", output_path.display());
    Ok(output_path)
}

/// Append each planned value to its cell, rejecting duplicate addresses.
fn apply_writes(
    sheet: &mut umya_spreadsheet::Worksheet,
    plan: &[CellWrite],
) -> Result<(), MergeError> {
    for (i, write) in plan.iter().enumerate() {
        if plan[..i].iter().any(|w| w.address == write.address) {
            return Err(MergeError::DuplicateCell {
                address: write.address.to_string(),
            });
        }
    }

    for write in plan {
        let existing = sheet.get_value(write.address);
        sheet
            .get_cell_mut(write.address)
            .set_value(format!("{} {}", existing, write.value));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn jane() -> WorkerRecord {
        WorkerRecord {
            dni: "12345678A".to_string(),
            worker_name: "Jane Doe".to_string(),
            center_address: "Main St 1".to_string(),
            template_category: Some("02_PI_ACOGIDA VULNERABLES_Dieta".to_string()),
            building_allowance: "10".to_string(),
            analytics_allowance: "20".to_string(),
            area_allowance: "5".to_string(),
        }
    }

    /// A minimal template with label text in the name cell, nothing else.
    fn template_bytes(dir: &Path) -> Vec<u8> {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_active_sheet_mut();
        sheet.get_cell_mut("A9").set_value("Trabajador/a:");

        let path = dir.join("template.xlsx");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        fs::read(&path).unwrap()
    }

    fn cell_value(path: &Path, address: &str) -> String {
        let book = umya_spreadsheet::reader::xlsx::read(path).unwrap();
        book.get_active_sheet().get_value(address)
    }

    #[test]
    fn merge_appends_values_to_their_cells() {
        let dir = TempDir::new().unwrap();
        let template = template_bytes(dir.path());
        let output_dir = dir.path().join("documentos");

        let path = merge(&template, &jane(), &output_dir).unwrap();

        assert_eq!(path.file_name().unwrap(), "Dieta_12345678A.xlsx");
        assert_eq!(cell_value(&path, "A9"), "Trabajador/a: Jane Doe");
        // Empty template cells still get the leading separator.
        assert_eq!(cell_value(&path, "A10"), " 12345678A");
        assert_eq!(cell_value(&path, "A11"), " Main St 1");
        assert_eq!(cell_value(&path, "B1"), " 10");
        assert_eq!(cell_value(&path, "B2"), " 20");
        assert_eq!(cell_value(&path, "B3"), " 5");
    }

    #[test]
    fn merge_creates_the_output_directory() {
        let dir = TempDir::new().unwrap();
        let template = template_bytes(dir.path());
        let output_dir = dir.path().join("nested").join("documentos");

        let path = merge(&template, &jane(), &output_dir).unwrap();
        assert!(path.starts_with(&output_dir));
        assert!(path.exists());
    }

    #[test]
    fn merge_is_append_only_not_idempotent() {
        let dir = TempDir::new().unwrap();
        let template = template_bytes(dir.path());
        let output_dir = dir.path().join("documentos");

        let first = merge(&template, &jane(), &output_dir).unwrap();
        let first_bytes = fs::read(&first).unwrap();
        let second = merge(&first_bytes, &jane(), &output_dir).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            cell_value(&second, "A9"),
            "Trabajador/a: Jane Doe Jane Doe"
        );
        assert_eq!(cell_value(&second, "A10"), " 12345678A 12345678A");
    }

    #[test]
    fn plan_addresses_are_one_to_one() {
        let plan = merge_plan(&jane());
        for (i, write) in plan.iter().enumerate() {
            assert!(
                !plan[..i].iter().any(|w| w.address == write.address),
                "address {} mapped twice",
                write.address
            );
        }
    }

    #[test]
    fn duplicate_address_in_a_plan_is_rejected() {
        let mut book = umya_spreadsheet::new_file();
        let plan = vec![
            CellWrite {
                address: "B1",
                value: "10".to_string(),
            },
            CellWrite {
                address: "B1",
                value: "5".to_string(),
            },
        ];

        match apply_writes(book.get_active_sheet_mut(), &plan) {
            Err(MergeError::DuplicateCell { address }) => assert_eq!(address, "B1"),
            other => panic!("expected DuplicateCell, got {:?}", other),
        }
    }

    #[test]
    fn garbage_template_is_a_template_error() {
        let dir = TempDir::new().unwrap();
        let result = merge(b"not an xlsx file", &jane(), dir.path());
        assert!(matches!(result, Err(MergeError::Template(_))));
    }
}
