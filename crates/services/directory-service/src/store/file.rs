//! JSON file helpers shared by the file-backed stores.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use common::StorageError;

/// Read and parse a JSON file. Any failure is logged and reported as `None`.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let raw = match fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Store file missing, using empty document");
            return None;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Store file unreadable, using empty document");
            return None;
        }
    };

    match serde_json::from_slice(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Store file malformed, using empty document");
            None
        }
    }
}

/// Serialize `value` and atomically replace `path` with it.
///
/// Writes to a sibling temp file, syncs it, then renames over the target.
pub(crate) async fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(value)?;
    let temp = temp_path(path);

    let result = write_and_rename(&temp, path, &bytes).await;
    if result.is_err() {
        let _ = fs::remove_file(&temp).await;
    }
    result
}

async fn write_and_rename(temp: &Path, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let mut file = fs::File::create(temp)
        .await
        .map_err(|e| StorageError::io("create", temp, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| StorageError::io("write", temp, e))?;
    file.sync_all()
        .await
        .map_err(|e| StorageError::io("sync", temp, e))?;
    drop(file);

    fs::rename(temp, path)
        .await
        .map_err(|e| StorageError::io("replace", path, e))
}

/// Create `path` holding `empty` if it does not exist yet.
/// Returns whether the file was created.
pub(crate) async fn ensure_file<T: Serialize + ?Sized>(
    path: &Path,
    empty: &T,
) -> Result<bool, StorageError> {
    let exists = fs::try_exists(path)
        .await
        .map_err(|e| StorageError::io("inspect", path, e))?;
    if exists {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::io("create directory", parent, e))?;
    }

    write_json_atomic(path, empty).await?;
    Ok(true)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}
