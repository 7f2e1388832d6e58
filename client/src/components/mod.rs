//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the board, the notification stack, and transient
//! notices while reading/writing shared state from Leptos context providers.

pub mod connection_status;
pub mod decision_modal;
pub mod kanban_board;
pub mod notification_feed;
pub mod toast_stack;
