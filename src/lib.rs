mod app;
mod bridge;
mod commands;
mod infra;
mod shared;
mod watcher;

#[cfg(desktop)]
pub(crate) use app::{autostart, notice};
pub(crate) use app::{logging, resident, shell};
pub(crate) use infra::{app_paths, settings};

use commands::*;
use std::sync::Arc;
use tauri::Manager;
use tokio::sync::mpsc;
use watcher::extract::{DomExtractor, ExtractionChannel};
use watcher::{Watcher, WatcherState};

const NOTIFICATION_CHANNEL_CAPACITY: usize = 16;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default().plugin(tauri_plugin_opener::init());

    #[cfg(desktop)]
    let builder = builder
        .plugin(tauri_plugin_autostart::Builder::new().build())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            resident::show_main_window(app);
        }));

    let app = builder
        .setup(|app| {
            logging::init(app.handle());

            // Observer → bridge: one-way, fire-and-forget, single consumer.
            let (requests_tx, requests_rx) = mpsc::channel(NOTIFICATION_CHANNEL_CAPACITY);
            bridge::spawn(app.handle().clone(), requests_rx);
            app.manage(bridge::BridgeHandle(requests_tx.clone()));

            let extraction = ExtractionChannel::default();
            app.manage(extraction.clone());

            let watcher = Watcher::new(
                DomExtractor::new(app.handle().clone(), extraction),
                requests_tx,
            );
            app.manage(WatcherState(Arc::new(watcher)));

            shell::create_main_window(app.handle())?;
            resident::spawn_reveal_fallback(app.handle().clone());

            #[cfg(desktop)]
            {
                let app_handle = app.handle().clone();
                // The autostart prompt blocks on a modal dialog; keep it off
                // the runtime's core workers.
                shared::blocking::run(move || {
                    notice::show_first_run_notification(&app_handle);
                    autostart::prompt_for_autostart(&app_handle);
                });
            }

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            title_changed,
            extraction_result,
            show_notification
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|_app_handle, _event| {
        #[cfg(target_os = "macos")]
        {
            // Platform convention: stay resident with no windows, and rebuild
            // the window when the dock icon is clicked.
            if let tauri::RunEvent::ExitRequested { api, code, .. } = &_event {
                if code.is_none() {
                    api.prevent_exit();
                }
            }

            if let tauri::RunEvent::Reopen {
                has_visible_windows,
                ..
            } = &_event
            {
                if !*has_visible_windows {
                    if _app_handle
                        .get_webview_window(shell::MAIN_WINDOW_LABEL)
                        .is_none()
                    {
                        if let Err(err) = shell::create_main_window(_app_handle) {
                            tracing::error!("failed to recreate main window: {err}");
                            return;
                        }
                    }
                    resident::show_main_window(_app_handle);
                }
            }
        }
    });
}
