//! CSRF token lookup for mutating requests.
//!
//! The server issues the token as the `csrftoken` cookie; pages that render a
//! form also carry it in a hidden `csrfmiddlewaretoken` field (or a meta tag
//! of that name), which serves as the fallback when the cookie is unreadable.

#[cfg(test)]
#[path = "csrf_test.rs"]
mod csrf_test;

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Extract the CSRF token from a `document.cookie` style string.
#[must_use]
pub fn token_from_cookies(cookies: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == CSRF_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_owned())
}

/// Current CSRF token: cookie first, then the page field, else empty.
pub fn current_token() -> String {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return String::new();
        };
        let from_cookie = document
            .clone()
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()
            .and_then(|doc| doc.cookie().ok())
            .and_then(|cookies| token_from_cookies(&cookies));
        if let Some(token) = from_cookie {
            return token;
        }
        let Some(field) = document.query_selector(&format!("[name={CSRF_FIELD}]")).ok().flatten() else {
            return String::new();
        };
        match field.dyn_into::<web_sys::HtmlInputElement>() {
            Ok(input) => input.value(),
            Err(meta) => meta.get_attribute("content").unwrap_or_default(),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}
