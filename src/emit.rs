//! Artifact persistence.
//!
//! The compiled bytes are staged next to the destination and renamed into
//! place, so callers either observe the complete artifact or no artifact at
//! all. Any existing file at the destination is replaced.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Write `bytes` to `destination` atomically.
pub async fn write_artifact(destination: &Path, bytes: &[u8]) -> io::Result<()> {
    let staging = staging_path(destination)?;

    if let Err(err) = fs::write(&staging, bytes).await {
        let _ = fs::remove_file(&staging).await;
        return Err(err);
    }

    if let Err(err) = fs::rename(&staging, destination).await {
        let _ = fs::remove_file(&staging).await;
        return Err(err);
    }

    log::debug!("wrote compiled artifact {}", destination.display());
    Ok(())
}

fn staging_path(destination: &Path) -> io::Result<PathBuf> {
    let file_name = destination.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("artifact path {} has no file name", destination.display()),
        )
    })?;
    Ok(destination.with_file_name(format!(".{}.staging", file_name.to_string_lossy())))
}
