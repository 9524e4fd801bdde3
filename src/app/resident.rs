//! Usage: Window host collaborator (restore/focus behavior, first-show gating).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tauri::Manager;

use crate::app::shell::MAIN_WINDOW_LABEL;

/// Upper bound on how long the window may stay hidden after launch.
pub(crate) const REVEAL_FALLBACK_DELAY: Duration = Duration::from_secs(10);

/// One-shot gate deciding which signal reveals the window: the page's first
/// title report (fast path) or the fallback timer. Exactly one claim wins.
pub(crate) struct RevealGate(AtomicBool);

impl RevealGate {
    pub(crate) const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub(crate) fn claim(&self) -> bool {
        !self.0.swap(true, Ordering::Relaxed)
    }
}

static REVEALED: RevealGate = RevealGate::new();

/// The surface the notification click behavior needs from the main window:
/// whether it is minimized, restoring it, and focusing it. Absence of the
/// window (already closed) makes every operation a no-op.
pub(crate) trait MainWindow {
    fn minimized(&self) -> bool;
    fn restore(&self);
    fn focus(&self);
}

impl MainWindow for tauri::WebviewWindow {
    fn minimized(&self) -> bool {
        self.is_minimized().unwrap_or(false)
    }

    fn restore(&self) {
        let _ = self.unminimize();
    }

    fn focus(&self) {
        let _ = self.set_focus();
    }
}

/// Un-minimizes the window if needed and brings it to the foreground.
/// No-op without error when the window reference is gone.
pub(crate) fn restore_and_focus<W: MainWindow>(window: Option<&W>) {
    let Some(window) = window else {
        return;
    };

    if window.minimized() {
        window.restore();
    }
    window.focus();
}

/// Activation entry point shared by the second-instance callback, macOS
/// reopen, and anything else that should surface the app.
pub(crate) fn show_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let _ = window.show();
    restore_and_focus(Some(&window));
}

fn reveal(app: &tauri::AppHandle) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        let _ = window.show();
    }
}

/// The window is created hidden; the first sign of life from the page (its
/// initial title report) reveals it.
pub(crate) fn show_on_first_page_signal(app: &tauri::AppHandle) {
    if REVEALED.claim() {
        reveal(app);
    }
}

/// The page may never report a title at all: the document can fail to load,
/// or the login flow can land on an origin without IPC access where the
/// observer's invoke throws and is swallowed. Reveal after a bounded wait so
/// the window cannot stay invisible forever.
pub(crate) fn spawn_reveal_fallback(app: tauri::AppHandle) {
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(REVEAL_FALLBACK_DELAY).await;
        if REVEALED.claim() {
            tracing::debug!("page never signaled, revealing window on fallback timer");
            reveal(&app);
        }
    });
}
