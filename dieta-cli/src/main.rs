//! dieta-cli: generate a worker's diet allowance sheet
//!
//! One run = one worker. The DNI comes from the command line or an
//! interactive prompt; the worker directory and the diet templates are
//! fetched from their fixed remote locations; the selected template gets the
//! worker's fields appended into its designated cells and the result is
//! saved under the output directory and opened.

mod catalog;
mod config;
mod directory;
mod error;
mod logging;
mod merge;
mod open;
mod remote;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::*;
use dialoguer::Input;

use crate::catalog::TemplateCatalog;
use crate::config::Settings;
use crate::directory::WorkerDirectory;
use crate::error::LookupError;
use crate::remote::RemoteClient;

#[derive(Parser, Debug)]
#[command(name = "dieta-cli", version, about = "Generate a worker's diet allowance sheet")]
struct Cli {
    /// Worker DNI; prompted for interactively when omitted
    dni: Option<String>,

    /// Alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the produced document (overrides config)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Do not open the produced document
    #[arg(long)]
    no_open: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = cli.output_dir {
        settings.output_dir = dir;
    }

    logging::init(&settings.log_file)?;

    let catalog = match &settings.catalog_file {
        Some(path) => TemplateCatalog::from_path(path)?,
        None => TemplateCatalog::embedded(),
    };
    log::debug!("template catalog has {} entries", catalog.template_count());

    let dni = match cli.dni {
        Some(dni) => dni,
        None => Input::<String>::new()
            .with_prompt("Introduce tu DNI")
            .interact_text()
            .context("failed to read DNI from prompt")?,
    };
    let dni = dni.trim().to_string();
    if dni.is_empty() {
        bail!("no DNI provided");
    }

    if let Err(err) = run(&dni, &settings, &catalog, cli.no_open).await {
        log::error!("{:#}", err);
        eprintln!("{} {:#}", "Error:".red(), err);
        std::process::exit(1);
    }

    Ok(())
}

/// The whole flow, in order: fetch directory, lookup, select template,
/// fetch it, merge, open. Each step's failure carries its own context.
async fn run(
    dni: &str,
    settings: &Settings,
    catalog: &TemplateCatalog,
    no_open: bool,
) -> Result<()> {
    let client = RemoteClient::new();

    let directory_bytes = client
        .fetch(&settings.directory_url)
        .await
        .context("failed to fetch the worker directory")?;
    let directory =
        WorkerDirectory::load(directory_bytes).context("failed to load the worker directory")?;
    log::info!("loaded {} worker records", directory.record_count());

    let record = match directory.lookup(dni) {
        Ok(record) => record,
        Err(LookupError::NotFound { dni }) => {
            log::warn!("no worker record found for DNI {}", dni);
            println!("{}", format!("No record found for DNI {}", dni).yellow());
            return Ok(());
        }
    };

    let template_url = catalog.select(record);
    let template_bytes = client
        .fetch(&template_url)
        .await
        .with_context(|| format!("failed to fetch template {}", template_url))?;

    let output_path = merge::merge(&template_bytes, record, &settings.output_dir)
        .context("failed to fill in the template")?;
    println!("{} {}", "Saved".green(), output_path.display());

    if !no_open {
        open::open_document(&output_path).context("failed to open the document")?;
    }

    Ok(())
}
