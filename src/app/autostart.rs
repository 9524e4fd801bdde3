//! Usage: One-time launch-at-startup prompt, wired to the autostart plugin.

use tauri_plugin_autostart::ManagerExt;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use crate::settings;

const PROMPT_TITLE: &str = "Démarrage automatique";
const PROMPT_MESSAGE: &str = "Voulez-vous lancer Vibe Messenger automatiquement au démarrage \
     de votre ordinateur ?\n\nVous ne manquerez aucun message important.";
const PROMPT_YES: &str = "Oui, lancer au démarrage";
const PROMPT_NO: &str = "Non, pas maintenant";

/// Asks once whether the app should launch at system startup. Skipped when
/// autostart is already enabled or the question was already asked; the answer
/// is recorded either way so the user is never nagged.
pub(crate) fn prompt_for_autostart(app: &tauri::AppHandle) {
    let mut persisted = settings::read(app);

    let already_enabled = app.autolaunch().is_enabled().unwrap_or(false);
    if already_enabled || persisted.has_asked_to_launch_at_startup {
        return;
    }

    let accepted = app
        .dialog()
        .message(PROMPT_MESSAGE)
        .title(PROMPT_TITLE)
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::OkCancelCustom(
            PROMPT_YES.to_string(),
            PROMPT_NO.to_string(),
        ))
        .blocking_show();

    if accepted {
        if let Err(err) = app.autolaunch().enable() {
            tracing::warn!("failed to enable launch at startup: {err}");
        } else {
            tracing::info!("launch at startup enabled");
        }
    }

    persisted.has_asked_to_launch_at_startup = true;
    if let Err(err) = settings::write(app, &persisted) {
        tracing::warn!("failed to persist autostart prompt flag: {err}");
    }
}
