use std::{fs, io::ErrorKind, path::Path};

use chrono::Utc;
use log::{debug, error, trace};

use crate::{NotesError, Result};

/// Current time in epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Reads persisted text from `path`.
///
/// A missing file is the same as nothing stored yet and yields an empty
/// string, which the parse helpers treat as an empty value.
pub fn read_store_text(path: &Path) -> Result<String> {
    debug!("Reading stored text from {}", path.display());
    match fs::read_to_string(path) {
        Ok(text) => {
            trace!("Read {} bytes from {}", text.len(), path.display());
            Ok(text)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist yet, treating as empty", path.display());
            Ok(String::new())
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            Err(NotesError::Io(e))
        }
    }
}

/// Writes `text` to `path`, creating parent directories as needed
pub fn write_store_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating directory: {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, text).map_err(|e| {
        error!("Failed to write {}: {}", path.display(), e);
        NotesError::Io(e)
    })?;
    trace!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

/// Splits a comma-separated `--tags` value into trimmed, non-empty tags
pub fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}
