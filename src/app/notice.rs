//! Usage: One-time first-run notification confirming that notifications work.

use tauri_plugin_notification::NotificationExt;

use crate::{bridge, settings};

const FIRST_RUN_TITLE: &str = "Messenger Desktop";
const FIRST_RUN_BODY: &str = "Les notifications sont activées !";

/// Shows the first-run notification once per install, gated by the persisted
/// `hasShownNotificationOnce` flag. Best-effort: an unavailable capability or
/// a failed settings write never surfaces to the caller.
pub(crate) fn show_first_run_notification(app: &tauri::AppHandle) {
    let mut persisted = settings::read(app);
    if persisted.has_shown_notification_once {
        return;
    }

    if !bridge::supported(app) {
        tracing::debug!("native notifications unavailable, skipping first-run notice");
        return;
    }

    if let Err(err) = app
        .notification()
        .builder()
        .title(FIRST_RUN_TITLE)
        .body(FIRST_RUN_BODY)
        .show()
    {
        tracing::warn!("failed to show first-run notification: {err}");
        return;
    }

    persisted.has_shown_notification_once = true;
    if let Err(err) = settings::write(app, &persisted) {
        tracing::warn!("failed to persist first-run flag: {err}");
    }
}
