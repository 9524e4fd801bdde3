//! Usage: Main window creation and navigation policy for the hosted page.

use tauri_plugin_opener::OpenerExt;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";

const MESSENGER_URL: &str = "https://www.messenger.com";
const WINDOW_TITLE: &str = "Vibe Messenger";

// Modern User-Agent; messenger.com blocks webviews that announce themselves.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const OBSERVER_SCRIPT: &str = include_str!("../../js/observer.js");

/// The login flow bounces through facebook.com; both hosts stay in-window.
/// Everything else opens in the system browser.
fn stays_in_window(url: &tauri::Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };

    host == "messenger.com"
        || host.ends_with(".messenger.com")
        || host == "facebook.com"
        || host.ends_with(".facebook.com")
}

/// Creates the (hidden) main window pointed at messenger.com, with the title
/// observer injected before any page script runs. The window is revealed by
/// `resident::show_on_first_page_signal` once the page reports its title.
pub(crate) fn create_main_window(app: &tauri::AppHandle) -> Result<tauri::WebviewWindow, String> {
    let url = tauri::Url::parse(MESSENGER_URL)
        .map_err(|e| format!("failed to parse messenger url: {e}"))?;

    let nav_app = app.clone();
    let window = tauri::WebviewWindowBuilder::new(
        app,
        MAIN_WINDOW_LABEL,
        tauri::WebviewUrl::External(url),
    )
    .title(WINDOW_TITLE)
    .inner_size(1200.0, 800.0)
    .min_inner_size(400.0, 600.0)
    .visible(false)
    .user_agent(USER_AGENT)
    .initialization_script(OBSERVER_SCRIPT)
    .on_navigation(move |url| {
        if stays_in_window(url) {
            return true;
        }

        if let Err(err) = nav_app.opener().open_url(url.as_str(), None::<&str>) {
            tracing::warn!("failed to open external url: {err}");
        }
        false
    })
    .build()
    .map_err(|e| format!("failed to create main window: {e}"))?;

    Ok(window)
}
