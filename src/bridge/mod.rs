//! Usage: Native notification bridge — consumes `NotificationRequest`s from
//! the observer's channel and presents them through the OS notification
//! center.
//!
//! Delivery is fire-and-forget: each request produces at most one native
//! notification, immediately, with no queueing or retry. When the capability
//! is unavailable the request is dropped silently.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Default notification title when a request carries none.
const APP_LABEL: &str = "Messenger";

/// Transient value passed from the observer to the bridge. Consumed exactly
/// once, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct NotificationRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub icon: Option<String>,
}

/// Producer end of the observer → bridge channel, managed as Tauri state so
/// the `show_notification` command can feed the same consumer.
#[derive(Clone)]
pub(crate) struct BridgeHandle(pub(crate) mpsc::Sender<NotificationRequest>);

/// Presentation seam so delivery policy (capability gate, defaults, failure
/// tolerance) is exercisable without an OS notification center.
pub(crate) trait Notify {
    fn supported(&self) -> bool;
    fn show(&self, title: String, body: String, icon: Option<String>) -> Result<(), String>;
}

struct PluginNotifier {
    app: tauri::AppHandle,
}

impl Notify for PluginNotifier {
    fn supported(&self) -> bool {
        supported(&self.app)
    }

    #[cfg(desktop)]
    fn show(&self, title: String, body: String, icon: Option<String>) -> Result<(), String> {
        use tauri_plugin_notification::NotificationExt;

        let mut builder = self.app.notification().builder().title(title).body(body);
        if let Some(icon) = icon {
            builder = builder.icon(icon);
        }
        builder.show().map_err(|e| e.to_string())

        // Clicking the notification activates the app; the window host handles
        // activation (see `resident::restore_and_focus`), since the desktop
        // notification surface exposes no per-notification click hook.
    }

    #[cfg(not(desktop))]
    fn show(&self, _title: String, _body: String, _icon: Option<String>) -> Result<(), String> {
        Ok(())
    }
}

/// Applies the bridge's defaults: missing title becomes the app label,
/// missing body becomes empty, missing icon stays omitted.
fn resolve(request: NotificationRequest) -> (String, String, Option<String>) {
    let title = request
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| APP_LABEL.to_string());
    let body = request.body.unwrap_or_default();
    (title, body, request.icon)
}

/// Presents one request: capability gate first, defaults applied, failures
/// logged and swallowed.
fn deliver<N: Notify>(notifier: &N, request: NotificationRequest) {
    if !notifier.supported() {
        tracing::debug!("native notifications unavailable, dropping request");
        return;
    }

    let (title, body, icon) = resolve(request);
    if let Err(err) = notifier.show(title, body, icon) {
        tracing::warn!("failed to show native notification: {err}");
    }
}

/// Spawns the single consumer task for the notification channel.
pub(crate) fn spawn(app: tauri::AppHandle, mut requests: mpsc::Receiver<NotificationRequest>) {
    tauri::async_runtime::spawn(async move {
        let notifier = PluginNotifier { app };
        while let Some(request) = requests.recv().await {
            deliver(&notifier, request);
        }
        tracing::debug!("notification channel closed, bridge consumer exiting");
    });
}

#[cfg(desktop)]
pub(crate) fn supported(app: &tauri::AppHandle) -> bool {
    use tauri_plugin_notification::{NotificationExt, PermissionState};

    match app.notification().permission_state() {
        Ok(PermissionState::Granted) => true,
        Ok(_) => matches!(
            app.notification().request_permission(),
            Ok(PermissionState::Granted)
        ),
        Err(err) => {
            tracing::debug!("notification permission state unavailable: {err}");
            false
        }
    }
}

#[cfg(not(desktop))]
pub(crate) fn supported(_app: &tauri::AppHandle) -> bool {
    false
}
