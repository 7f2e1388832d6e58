//! Browser surfaces around live notifications: OS notifications, the alert
//! sound, and page reload.
//!
//! Every call is best-effort. Missing APIs, denied permissions, and blocked
//! autoplay are swallowed so the in-page feed keeps working. SSR paths no-op.

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

pub const NOTIFICATION_ICON: &str = "/static/img/notification-icon.png";
pub const SOUND_SELECTOR: &str = ".notification-sound";

/// Mirror of the page's OS notification permission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionState {
    #[default]
    Default,
    Granted,
    Denied,
}

impl PermissionState {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            _ => Self::Default,
        }
    }
}

/// Ask only when the API exists and the user has not decided yet.
#[must_use]
pub fn should_request_permission(supported: bool, state: PermissionState) -> bool {
    supported && state == PermissionState::Default
}

#[must_use]
pub fn may_show_os_notification(supported: bool, state: PermissionState) -> bool {
    supported && state == PermissionState::Granted
}

#[cfg(feature = "hydrate")]
fn notifications_supported() -> bool {
    web_sys::window().is_some_and(|w| js_sys::Reflect::has(&w, &"Notification".into()).unwrap_or(false))
}

#[cfg(feature = "hydrate")]
fn current_permission() -> PermissionState {
    match web_sys::Notification::permission() {
        web_sys::NotificationPermission::Granted => PermissionState::Granted,
        web_sys::NotificationPermission::Denied => PermissionState::Denied,
        _ => PermissionState::Default,
    }
}

/// Request OS notification permission once, at startup.
pub async fn request_notification_permission() {
    #[cfg(feature = "hydrate")]
    {
        if !should_request_permission(notifications_supported(), current_permission()) {
            return;
        }
        let Ok(promise) = web_sys::Notification::request_permission() else {
            return;
        };
        match wasm_bindgen_futures::JsFuture::from(promise).await {
            Ok(value) => {
                let state = PermissionState::parse(&value.as_string().unwrap_or_default());
                leptos::logging::log!("notification permission: {state:?}");
            }
            Err(_) => leptos::logging::warn!("notification permission request failed"),
        }
    }
}

/// Show an OS-level notification when permission was granted.
pub fn show_os_notification(title: &str, body: &str) {
    #[cfg(feature = "hydrate")]
    {
        if !may_show_os_notification(notifications_supported(), current_permission()) {
            return;
        }
        let options = web_sys::NotificationOptions::new();
        options.set_body(body);
        options.set_icon(NOTIFICATION_ICON);
        if web_sys::Notification::new_with_options(title, &options).is_err() {
            leptos::logging::warn!("OS notification failed");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (title, body);
    }
}

/// Play the page's notification sound. Autoplay refusals are ignored.
pub fn play_notification_sound() {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let audio = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.query_selector(SOUND_SELECTOR).ok().flatten())
            .and_then(|el| el.dyn_into::<web_sys::HtmlAudioElement>().ok());
        let Some(audio) = audio else {
            return;
        };
        if let Ok(promise) = audio.play() {
            leptos::task::spawn_local(async move {
                if wasm_bindgen_futures::JsFuture::from(promise).await.is_err() {
                    leptos::logging::log!("notification sound blocked");
                }
            });
        }
    }
}

/// Reload the current page.
pub fn reload_page() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}
