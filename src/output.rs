//! Reading reference images and persisting generated ones.

use crate::{error::Result, models::TaskType};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};

pub async fn read_image(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Writes `bytes` to `path`, replacing any existing file and creating
/// missing parent directories.
pub async fn save_image(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    log::info!("Image saved to: {}", path.display());
    Ok(())
}

/// ISO-8601 instant with `:` and `.` swapped for `-`, safe in file names.
pub fn file_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

pub fn timestamped_output_path(dir: impl AsRef<Path>, task: TaskType, now: DateTime<Utc>) -> PathBuf {
    dir.as_ref()
        .join(format!("{}-{}.png", task.slug(), file_timestamp(now)))
}
