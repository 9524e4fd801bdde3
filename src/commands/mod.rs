//! Usage: IPC surface exposed to the hosted page (observer events and the
//! direct notification path).

use crate::bridge::{BridgeHandle, NotificationRequest};
use crate::resident;
use crate::watcher::extract::{ExtractionChannel, MessageInfo};
use crate::watcher::WatcherState;

/// Raw title report from the page-side mutation observer. Every decision
/// (parsing, trigger, settle, cooldown) happens on this side of the boundary.
#[tauri::command]
pub(crate) fn title_changed(
    app: tauri::AppHandle,
    watcher: tauri::State<'_, WatcherState>,
    title: String,
) {
    resident::show_on_first_page_signal(&app);
    watcher.0.on_title(&title);
}

/// Answer to an extraction probe issued after the settle delay.
#[tauri::command]
pub(crate) fn extraction_result(
    channel: tauri::State<'_, ExtractionChannel>,
    info: MessageInfo,
) {
    channel.resolve(info);
}

/// Direct notification path for any caller across the boundary; feeds the
/// same channel (and therefore the same defaults) as the observer.
#[tauri::command]
pub(crate) async fn show_notification(
    bridge: tauri::State<'_, BridgeHandle>,
    request: NotificationRequest,
) -> Result<(), String> {
    bridge
        .0
        .send(request)
        .await
        .map_err(|_| "notification channel closed".to_string())
}
