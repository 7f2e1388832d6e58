//! Networking modules for HTTP and the live push channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `push_client` manages the websocket lifecycle,
//! and `notifications`/`kanban` turn inbound messages and user actions into
//! state updates.

pub mod api;
pub mod kanban;
pub mod notifications;
pub mod push_client;
