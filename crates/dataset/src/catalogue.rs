//! Dataset discovery in a data directory.
//!
//! The directory holds one `<org>_<repo>.json` per analyzed repository and an
//! index, `files.json`, listing them in the order they were added.

use std::fs;
use std::path::Path;

use crate::error::{DatasetError, Result};

pub const INDEX_FILE: &str = "files.json";

/// Human-readable name of a dataset file: `google_gson.json` becomes `google/gson`.
pub fn display_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
    stem.replacen('_', "/", 1)
}

/// Dataset file names in `dir`: index entries first, then any other `*.json`
/// files in name order. Missing index or directory yields whatever was found.
pub fn discover_datasets(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let mut found = match read_index(dir) {
        Ok(entries) => entries,
        Err(DatasetError::Json(e)) => {
            log::warn!("Ignoring unreadable index in {}: {}", dir.display(), e);
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    if dir.is_dir() {
        let mut loose = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| DatasetError::io(dir, e))? {
            let entry = entry.map_err(|e| DatasetError::io(dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json") && name != INDEX_FILE && entry.path().is_file() {
                loose.push(name);
            }
        }
        loose.sort();
        for name in loose {
            if !found.contains(&name) {
                found.push(name);
            }
        }
    }

    log::debug!("Discovered {} datasets in {}", found.len(), dir.display());
    Ok(found)
}

/// Add `file_name` to the index if it is not listed yet. Returns whether the index changed.
/// An index that does not parse is an error and is left untouched.
pub fn register_dataset(dir: impl AsRef<Path>, file_name: &str) -> Result<bool> {
    let dir = dir.as_ref();
    let mut entries = read_index(dir)?;
    if entries.iter().any(|e| e == file_name) {
        return Ok(false);
    }
    entries.push(file_name.to_string());

    fs::create_dir_all(dir).map_err(|e| DatasetError::io(dir, e))?;
    let path = dir.join(INDEX_FILE);
    fs::write(&path, serde_json::to_string(&entries)?).map_err(|e| DatasetError::io(&path, e))?;
    Ok(true)
}

fn read_index(dir: &Path) -> Result<Vec<String>> {
    let path = dir.join(INDEX_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(&path).map_err(|e| DatasetError::io(&path, e))?;
    let mut entries: Vec<String> = serde_json::from_str(&json)?;
    let mut seen = Vec::with_capacity(entries.len());
    entries.retain(|e| {
        let fresh = !seen.contains(e);
        seen.push(e.clone());
        fresh
    });
    Ok(entries)
}
