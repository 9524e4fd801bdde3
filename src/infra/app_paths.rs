//! Usage: Resolve the per-user app data directory.

use std::path::PathBuf;
use tauri::Manager;

const APP_DOTDIR_NAME: &str = ".vibe-messenger";
const APP_DIR_ENV: &str = "VIBE_MESSENGER_DATA_DIR";

/// Dot-directory under the user's home, overridable through
/// `VIBE_MESSENGER_DATA_DIR` for development. Created on first use.
pub(crate) fn app_data_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let dir = match std::env::var_os(APP_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let home_dir = app
                .path()
                .home_dir()
                .map_err(|e| format!("failed to resolve home dir: {e}"))?;
            home_dir.join(APP_DOTDIR_NAME)
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| format!("failed to create app dir: {e}"))?;

    Ok(dir)
}
