//! Usage: tracing initialization (env-filtered console plus a daily-rolling
//! file under the app data dir). Failures fall back to console-only logging.

use std::sync::OnceLock;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::app_paths;

const LOG_FILTER_ENV: &str = "VIBE_MESSENGER_LOG";
const LOG_DIR_NAME: &str = "logs";
const LOG_FILE_PREFIX: &str = "vibe-messenger.log";

// Keeps the non-blocking writer alive for the process lifetime.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

pub(crate) fn init(app: &tauri::AppHandle) {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    match app_paths::app_data_dir(app) {
        Ok(dir) => {
            let appender =
                tracing_appender::rolling::daily(dir.join(LOG_DIR_NAME), LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = LOG_GUARD.set(guard);

            let file_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            let _ = registry.with(file_layer).try_init();
        }
        Err(err) => {
            let _ = registry.try_init();
            tracing::warn!("log file unavailable, console only: {err}");
        }
    }

    let _ = tracing_log::LogTracer::init();
}
