//! Usage: Title-change observer — turns qualifying unread-count increases into
//! notification requests.
//!
//! The page reports raw titles over the `title_changed` command; everything
//! else happens here. A qualifying change (strictly increasing unread count,
//! outside the cooldown window) schedules a single-flight extraction after a
//! short settle delay, then pushes exactly one `NotificationRequest` down the
//! one-way channel to the bridge. Title state updates synchronously on every
//! observed change regardless of scheduling outcome.

pub(crate) mod extract;
pub(crate) mod gate;
pub(crate) mod title;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::bridge::NotificationRequest;
use crate::shared::mutex_ext::MutexExt;
use extract::{Extract, MessageInfo};
use gate::Cooldown;
use title::TitleState;

pub(crate) const SETTLE_DELAY: Duration = Duration::from_millis(300);
pub(crate) const COOLDOWN_WINDOW: Duration = Duration::from_millis(2000);

const FALLBACK_TITLE: &str = "Messenger";
const FALLBACK_BODY: &str = "Nouveau message";
const PREVIEW_FALLBACK: &str = "Vous a envoyé un message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleAction {
    Ignore,
    Schedule,
}

/// Pure decision core: trigger condition plus the cooldown gate. The settle
/// timer stays outside so this piece is testable with explicit instants.
struct WatchEngine {
    titles: TitleState,
    cooldown: Cooldown,
}

impl WatchEngine {
    fn new(initial_title: &str, cooldown_window: Duration) -> Self {
        Self {
            titles: TitleState::new(initial_title),
            cooldown: Cooldown::new(cooldown_window),
        }
    }

    fn on_title(&mut self, title: &str, now: Instant) -> TitleAction {
        let Some(count) = self.titles.observe(title) else {
            return TitleAction::Ignore;
        };

        if !self.cooldown.allows(now) {
            tracing::debug!(count, "qualifying title change suppressed by cooldown");
            return TitleAction::Ignore;
        }

        tracing::debug!(count, "unread count increased, scheduling extraction");
        TitleAction::Schedule
    }

    fn record_fired(&mut self, now: Instant) {
        self.cooldown.record_fired(now);
    }
}

fn request_for(info: MessageInfo) -> NotificationRequest {
    match info.name {
        Some(name) => NotificationRequest {
            title: Some(name),
            body: Some(info.preview.unwrap_or_else(|| PREVIEW_FALLBACK.to_string())),
            icon: None,
        },
        None => NotificationRequest {
            title: Some(FALLBACK_TITLE.to_string()),
            body: Some(FALLBACK_BODY.to_string()),
            icon: None,
        },
    }
}

pub(crate) type AppWatcher = Watcher<extract::DomExtractor>;

/// Tauri-managed handle to the one watcher instance.
pub(crate) struct WatcherState(pub(crate) Arc<AppWatcher>);

pub(crate) struct Watcher<E: Extract> {
    engine: Arc<Mutex<Option<WatchEngine>>>,
    pending: Mutex<Option<tauri::async_runtime::JoinHandle<()>>>,
    requests: mpsc::Sender<NotificationRequest>,
    extractor: Arc<E>,
    settle_delay: Duration,
    cooldown_window: Duration,
}

impl<E: Extract> Watcher<E> {
    pub(crate) fn new(extractor: E, requests: mpsc::Sender<NotificationRequest>) -> Self {
        Self::with_timings(extractor, requests, SETTLE_DELAY, COOLDOWN_WINDOW)
    }

    pub(crate) fn with_timings(
        extractor: E,
        requests: mpsc::Sender<NotificationRequest>,
        settle_delay: Duration,
        cooldown_window: Duration,
    ) -> Self {
        Self {
            engine: Arc::new(Mutex::new(None)),
            pending: Mutex::new(None),
            requests,
            extractor: Arc::new(extractor),
            settle_delay,
            cooldown_window,
        }
    }

    /// Entry point for every title the page reports. The first observation
    /// seeds the state without triggering.
    pub(crate) fn on_title(&self, title: &str) {
        let now = Instant::now();

        let action = {
            let mut engine = self.engine.lock_or_recover();
            match engine.as_mut() {
                None => {
                    tracing::debug!(
                        initial_count = title::parse_unread_count(title),
                        "title observer seeded"
                    );
                    *engine = Some(WatchEngine::new(title, self.cooldown_window));
                    TitleAction::Ignore
                }
                Some(engine) => engine.on_title(title, now),
            }
        };

        if action == TitleAction::Schedule {
            self.schedule_extraction();
        }
    }

    fn schedule_extraction(&self) {
        let engine = Arc::clone(&self.engine);
        let extractor = Arc::clone(&self.extractor);
        let requests = self.requests.clone();
        let settle_delay = self.settle_delay;

        let task = tauri::async_runtime::spawn(async move {
            // Let the conversation list finish updating before probing it.
            tokio::time::sleep(settle_delay).await;

            let info = extractor.latest_message().await;
            let request = request_for(info);

            if requests.send(request).await.is_err() {
                tracing::warn!("notification channel closed, dropping request");
                return;
            }

            // Cooldown counts from the firing time, not the scheduling time.
            if let Some(engine) = engine.lock_or_recover().as_mut() {
                engine.record_fired(Instant::now());
            }
        });

        // Single-flight: a new qualifying change cancels and replaces any
        // pending extraction.
        if let Some(previous) = self.pending.lock_or_recover().replace(task) {
            previous.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use tokio::time::timeout;

    const RECV: Duration = Duration::from_millis(1000);
    const QUIET: Duration = Duration::from_millis(250);

    #[derive(Clone)]
    struct StubExtract(MessageInfo);

    impl Extract for StubExtract {
        fn latest_message(&self) -> impl Future<Output = MessageInfo> + Send {
            let info = self.0.clone();
            async move { info }
        }
    }

    fn watcher_with(
        info: MessageInfo,
        settle: Duration,
        cooldown: Duration,
    ) -> (Arc<Watcher<StubExtract>>, mpsc::Receiver<NotificationRequest>) {
        let (tx, rx) = mpsc::channel(4);
        let watcher = Arc::new(Watcher::with_timings(StubExtract(info), tx, settle, cooldown));
        (watcher, rx)
    }

    fn alice() -> MessageInfo {
        MessageInfo {
            name: Some("Alice".into()),
            preview: Some("salut".into()),
        }
    }

    #[test]
    fn engine_schedules_only_on_strict_increase() {
        let t0 = Instant::now();
        let mut engine = WatchEngine::new("Messenger", COOLDOWN_WINDOW);
        assert_eq!(engine.on_title("(1) Messenger", t0), TitleAction::Schedule);
        assert_eq!(engine.on_title("(1) Messenger", t0), TitleAction::Ignore);
        assert_eq!(engine.on_title("Messenger", t0), TitleAction::Ignore);
        assert_eq!(engine.on_title("(2) Messenger", t0), TitleAction::Schedule);
    }

    #[test]
    fn engine_suppresses_within_cooldown_but_still_updates_state() {
        let t0 = Instant::now();
        let mut engine = WatchEngine::new("Messenger", Duration::from_millis(2000));

        assert_eq!(engine.on_title("(1) Messenger", t0), TitleAction::Schedule);
        engine.record_fired(t0);

        // Scheduled firing would land inside the cooldown window: suppressed.
        let t1 = t0 + Duration::from_millis(1000);
        assert_eq!(engine.on_title("(2) Messenger", t1), TitleAction::Ignore);

        // The suppressed change still updated last_unread, so only a count
        // above 2 qualifies once the window has passed.
        let t2 = t0 + Duration::from_millis(3000);
        assert_eq!(engine.on_title("(2) Messenger · x", t2), TitleAction::Ignore);
        assert_eq!(engine.on_title("(3) Messenger", t2), TitleAction::Schedule);
    }

    #[test]
    fn request_falls_back_when_extraction_is_empty() {
        let request = request_for(MessageInfo::none());
        assert_eq!(request.title.as_deref(), Some("Messenger"));
        assert_eq!(request.body.as_deref(), Some("Nouveau message"));
        assert!(request.icon.is_none());
    }

    #[test]
    fn request_falls_back_on_missing_preview_only() {
        let request = request_for(MessageInfo {
            name: Some("Alice".into()),
            preview: None,
        });
        assert_eq!(request.title.as_deref(), Some("Alice"));
        assert_eq!(request.body.as_deref(), Some("Vous a envoyé un message"));
    }

    #[tokio::test]
    async fn fires_once_after_the_settle_delay() {
        let (watcher, mut rx) = watcher_with(
            alice(),
            Duration::from_millis(30),
            Duration::from_millis(500),
        );
        watcher.on_title("Messenger");
        watcher.on_title("(1) Messenger");

        let request = timeout(RECV, rx.recv()).await.expect("fired").expect("open");
        assert_eq!(request.title.as_deref(), Some("Alice"));
        assert_eq!(request.body.as_deref(), Some("salut"));
    }

    #[tokio::test]
    async fn first_title_only_seeds_state() {
        let (watcher, mut rx) = watcher_with(
            alice(),
            Duration::from_millis(10),
            Duration::from_millis(100),
        );
        // Even a counted title must not trigger on the seed observation.
        watcher.on_title("(3) Messenger");
        assert!(timeout(QUIET, rx.recv()).await.is_err());
    }

    #[tokio::test]
    async fn second_qualifying_change_cancels_the_pending_extraction() {
        let (watcher, mut rx) = watcher_with(
            alice(),
            Duration::from_millis(120),
            Duration::from_millis(500),
        );
        watcher.on_title("Messenger");
        watcher.on_title("(1) Messenger");
        tokio::time::sleep(Duration::from_millis(20)).await;
        watcher.on_title("(2) Messenger");

        let _ = timeout(RECV, rx.recv()).await.expect("fired").expect("open");
        // The first scheduled extraction was replaced, so nothing else fires.
        assert!(timeout(QUIET, rx.recv()).await.is_err());
    }

    #[tokio::test]
    async fn cooldown_suppresses_a_second_firing() {
        let (watcher, mut rx) = watcher_with(
            alice(),
            Duration::from_millis(10),
            Duration::from_millis(600),
        );
        watcher.on_title("Messenger");
        watcher.on_title("(1) Messenger");
        let _ = timeout(RECV, rx.recv()).await.expect("fired").expect("open");
        // Let the firing task record its timestamp before the next change.
        tokio::time::sleep(Duration::from_millis(50)).await;

        watcher.on_title("(2) Messenger");
        assert!(timeout(QUIET, rx.recv()).await.is_err());

        // Once the window has passed, a fresh increase fires again.
        tokio::time::sleep(Duration::from_millis(700)).await;
        watcher.on_title("(3) Messenger");
        assert!(timeout(RECV, rx.recv()).await.expect("fired").is_some());
    }

    #[tokio::test]
    async fn empty_extraction_still_fires_with_fallback_text() {
        let (watcher, mut rx) = watcher_with(
            MessageInfo::none(),
            Duration::from_millis(10),
            Duration::from_millis(100),
        );
        watcher.on_title("Messenger");
        watcher.on_title("(1) Messenger");

        let request = timeout(RECV, rx.recv()).await.expect("fired").expect("open");
        assert_eq!(request.title.as_deref(), Some("Messenger"));
        assert_eq!(request.body.as_deref(), Some("Nouveau message"));
    }
}
