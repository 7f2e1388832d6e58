//! # client
//!
//! Leptos + WASM frontend for the application review board: a three-column
//! kanban of applications and a live notification stack, both fed by one
//! push channel.
//!
//! This crate contains pages, components, application state, REST helpers,
//! and the reconnecting push client. Wire types and the reconnect state
//! machine live in the `frames` crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
