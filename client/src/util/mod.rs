//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (cookies, the page
//! bootstrap element, OS notifications, timed toasts) from page and
//! component logic.

pub mod bootstrap;
pub mod browser;
pub mod csrf;
pub mod toast;
