//! Usage: Persisted first-run flags (flat `settings.json`, read-tolerant, atomic writes).
//!
//! The file holds at most two booleans and has no schema versioning. Reads
//! never fail: a missing or unparsable file yields the default record. Writes
//! are wholesale and pretty-printed; write failures are logged by callers and
//! never interrupt them.

use crate::app_paths;
use crate::shared::fs::{read_optional_file, write_file_atomic};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct FirstRunSettings {
    pub has_shown_notification_once: bool,
    pub has_asked_to_launch_at_startup: bool,
}

fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join(SETTINGS_FILE_NAME))
}

pub(crate) fn read(app: &tauri::AppHandle) -> FirstRunSettings {
    match settings_path(app) {
        Ok(path) => read_from(&path),
        Err(err) => {
            tracing::warn!("settings path unavailable, using defaults: {err}");
            FirstRunSettings::default()
        }
    }
}

pub(crate) fn read_from(path: &Path) -> FirstRunSettings {
    let bytes = match read_optional_file(path) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return FirstRunSettings::default(),
        Err(err) => {
            tracing::warn!("failed to read settings, using defaults: {err}");
            return FirstRunSettings::default();
        }
    };

    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        tracing::warn!("unparsable {}, using defaults: {err}", path.display());
        FirstRunSettings::default()
    })
}

pub(crate) fn write(app: &tauri::AppHandle, settings: &FirstRunSettings) -> Result<(), String> {
    write_to(&settings_path(app)?, settings)
}

pub(crate) fn write_to(path: &Path, settings: &FirstRunSettings) -> Result<(), String> {
    let content = serde_json::to_vec_pretty(settings)
        .map_err(|e| format!("failed to serialize settings: {e}"))?;
    write_file_atomic(path, &content)
}
