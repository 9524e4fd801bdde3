//! Usage: Best-effort sender/preview extraction from the hosted page.
//!
//! The DOM lookup itself runs inside the page (see `js/observer.js`); this
//! side evals a probe and waits briefly for the answer to come back over the
//! `extraction_result` command. Every failure mode (no window, eval error,
//! probe timeout, page-side error) degrades to "no information available" —
//! extraction never surfaces an error to its caller.

use serde::Deserialize;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tauri::Manager;
use tokio::sync::oneshot;

use crate::app::shell::MAIN_WINDOW_LABEL;
use crate::shared::mutex_ext::MutexExt;

const EXTRACT_PROBE: &str = "window.__VIBE_EXTRACT__ && window.__VIBE_EXTRACT__();";
const EXTRACT_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct MessageInfo {
    pub name: Option<String>,
    pub preview: Option<String>,
}

impl MessageInfo {
    pub(crate) fn none() -> Self {
        Self::default()
    }
}

/// Seam between the watcher and the page DOM, so the scheduling logic can be
/// exercised without a webview.
pub(crate) trait Extract: Send + Sync + 'static {
    fn latest_message(&self) -> impl Future<Output = MessageInfo> + Send;
}

/// Hands a probe answer from the `extraction_result` command to the pending
/// `latest_message` call. At most one probe is outstanding; a newer probe
/// replaces a stale unanswered one.
#[derive(Clone, Default)]
pub(crate) struct ExtractionChannel {
    pending: Arc<Mutex<Option<oneshot::Sender<MessageInfo>>>>,
}

impl ExtractionChannel {
    fn begin(&self) -> oneshot::Receiver<MessageInfo> {
        let (tx, rx) = oneshot::channel();
        *self.pending.lock_or_recover() = Some(tx);
        rx
    }

    pub(crate) fn resolve(&self, info: MessageInfo) {
        if let Some(tx) = self.pending.lock_or_recover().take() {
            let _ = tx.send(info);
        }
    }
}

pub(crate) struct DomExtractor {
    app: tauri::AppHandle,
    channel: ExtractionChannel,
}

impl DomExtractor {
    pub(crate) fn new(app: tauri::AppHandle, channel: ExtractionChannel) -> Self {
        Self { app, channel }
    }
}

impl Extract for DomExtractor {
    async fn latest_message(&self) -> MessageInfo {
        let Some(window) = self.app.get_webview_window(MAIN_WINDOW_LABEL) else {
            return MessageInfo::none();
        };

        let answer = self.channel.begin();

        if let Err(err) = window.eval(EXTRACT_PROBE) {
            tracing::debug!("extraction probe eval failed: {err}");
            return MessageInfo::none();
        }

        match tokio::time::timeout(EXTRACT_TIMEOUT, answer).await {
            Ok(Ok(info)) => info,
            _ => MessageInfo::none(),
        }
    }
}
