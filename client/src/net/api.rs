//! REST API helpers for notifications and application cards.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, String>`. Callers turn failures into toasts
//! or log lines; nothing here panics or retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use frames::{ApplicationStatus, NotificationPayload};
#[cfg(any(test, feature = "hydrate"))]
use serde::Deserialize;

#[cfg(any(test, feature = "hydrate"))]
const UNREAD_ENDPOINT: &str = "/api/notifications/unread/";
#[cfg(any(test, feature = "hydrate"))]
const MARK_ALL_READ_ENDPOINT: &str = "/api/notifications/mark-all-read/";
#[cfg(any(test, feature = "hydrate"))]
const UPDATE_STATUS_ENDPOINT: &str = "/applications/update-status/";

#[cfg(any(test, feature = "hydrate"))]
fn mark_read_endpoint(notification_id: u64) -> String {
    format!("/api/notifications/{notification_id}/read/")
}

#[cfg(any(test, feature = "hydrate"))]
fn card_endpoint(application_id: u64) -> String {
    format!("/applications/{application_id}/card/")
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(what: &str, status: u16) -> String {
    format!("{what} failed: {status}")
}

/// Body of the unread listing. Older servers omit `results` when empty.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Default, Deserialize)]
struct UnreadResponse {
    #[serde(default)]
    results: Vec<NotificationPayload>,
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_unread(body: &str) -> Result<Vec<NotificationPayload>, String> {
    serde_json::from_str::<UnreadResponse>(body)
        .map(|r| r.results)
        .map_err(|e| e.to_string())
}

/// Fetch unread notifications via `GET /api/notifications/unread/`.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is malformed.
pub async fn fetch_unread_notifications() -> Result<Vec<NotificationPayload>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(UNREAD_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("unread notifications", resp.status()));
        }
        let body = resp.text().await.map_err(|e| e.to_string())?;
        parse_unread(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Mark one notification read via `POST /api/notifications/{id}/read/`.
///
/// # Errors
///
/// Returns an error string if the request fails or is rejected.
pub async fn mark_notification_read(notification_id: u64) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&mark_read_endpoint(notification_id))
            .header("Content-Type", "application/json")
            .header(crate::util::csrf::CSRF_HEADER, &crate::util::csrf::current_token())
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("mark read", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = notification_id;
        Err("not available on server".to_owned())
    }
}

/// Mark every notification read via `POST /api/notifications/mark-all-read/`.
///
/// # Errors
///
/// Returns an error string if the request fails or is rejected.
pub async fn mark_all_notifications_read() -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(MARK_ALL_READ_ENDPOINT)
            .header("Content-Type", "application/json")
            .header(crate::util::csrf::CSRF_HEADER, &crate::util::csrf::current_token())
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("mark all read", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Fetch server-rendered card markup via `GET /applications/{id}/card/`.
///
/// # Errors
///
/// Returns an error string if the request fails or is rejected.
pub async fn fetch_card_html(application_id: u64) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&card_endpoint(application_id))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("card fetch", resp.status()));
        }
        resp.text().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = application_id;
        Err("not available on server".to_owned())
    }
}

/// Request a status change via `POST /applications/update-status/`.
///
/// The server answers with the re-rendered card markup.
///
/// # Errors
///
/// Returns an error string if the request fails or the server refuses the
/// transition.
pub async fn update_application_status(application_id: u64, status: ApplicationStatus) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        use crate::util::csrf;

        let token = csrf::current_token();
        let form = web_sys::FormData::new().map_err(|_| "form data unavailable".to_owned())?;
        form.append_with_str("application_id", &application_id.to_string())
            .and_then(|()| form.append_with_str("status", status.as_str()))
            .and_then(|()| form.append_with_str(csrf::CSRF_FIELD, &token))
            .map_err(|_| "form data unavailable".to_owned())?;
        let resp = gloo_net::http::Request::post(UPDATE_STATUS_ENDPOINT)
            .header("X-Requested-With", "XMLHttpRequest")
            .header(csrf::CSRF_HEADER, &token)
            .body(form)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("status update", resp.status()));
        }
        resp.text().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (application_id, status);
        Err("not available on server".to_owned())
    }
}
