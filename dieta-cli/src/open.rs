//! Launch a produced document with the platform default application

use std::path::Path;
use std::process::Command;

use crate::error::OpenError;

/// Open the file with the system handler. The viewer is spawned and not
/// waited on; only the failure to spawn is reported.
pub fn open_document(path: &Path) -> Result<(), OpenError> {
    spawn_opener(path).map_err(|source| OpenError::Launch {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(target_os = "windows")]
fn spawn_opener(path: &Path) -> std::io::Result<()> {
    Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(path)
        .spawn()
        .map(|_| ())
}

#[cfg(target_os = "macos")]
fn spawn_opener(path: &Path) -> std::io::Result<()> {
    Command::new("open").arg(path).spawn().map(|_| ())
}

#[cfg(target_os = "linux")]
fn spawn_opener(path: &Path) -> std::io::Result<()> {
    Command::new("xdg-open").arg(path).spawn().map(|_| ())
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn spawn_opener(_path: &Path) -> std::io::Result<()> {
    Err(std::io::Error::other("unsupported platform"))
}
