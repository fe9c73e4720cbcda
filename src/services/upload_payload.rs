//! Reads files picked in the native dialog into page-ready payloads.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::types::errors::FileChooserError;
use crate::types::file_chooser::{mime_for_extension, SelectedFile};
use crate::types::settings::UploadSettings;

/// Reads one file, enforcing the size limit.
pub fn read_selected_file(path: &Path, max_bytes: u64) -> Result<SelectedFile, FileChooserError> {
    let display = path.display().to_string();
    let metadata = fs::metadata(path)
        .map_err(|e| FileChooserError::ReadFailed(format!("{}: {}", display, e)))?;
    if !metadata.is_file() {
        return Err(FileChooserError::ReadFailed(format!("{}: not a regular file", display)));
    }
    if metadata.len() > max_bytes {
        return Err(FileChooserError::ReadFailed(format!(
            "{}: {} bytes exceeds the {} byte limit",
            display,
            metadata.len(),
            max_bytes
        )));
    }

    let bytes = fs::read(path)
        .map_err(|e| FileChooserError::ReadFailed(format!("{}: {}", display, e)))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    let mime = path
        .extension()
        .map(|e| mime_for_extension(&e.to_string_lossy()))
        .unwrap_or("application/octet-stream")
        .to_string();
    let last_modified = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    Ok(SelectedFile {
        name,
        mime,
        size: bytes.len() as u64,
        last_modified,
        data: BASE64.encode(&bytes),
    })
}

/// Reads selected paths in order, skipping files that are too large or
/// unreadable, until `max_files` usable files are collected.
pub fn collect_selected_files(paths: &[PathBuf], settings: &UploadSettings) -> Vec<SelectedFile> {
    let limit = settings.max_files.max(1) as usize;

    let files: Vec<SelectedFile> = paths
        .iter()
        .filter_map(|path| match read_selected_file(path, settings.max_file_bytes) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!("skipping upload: {}", e);
                None
            }
        })
        .take(limit)
        .collect();
    if files.len() == limit && paths.len() > limit {
        tracing::warn!(selected = paths.len(), limit, "too many files selected, truncating");
    }
    files
}
