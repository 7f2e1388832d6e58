//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`connection`, `kanban`, `notifications`, `ui`)
//! so components depend on small focused models. Every type here is plain
//! data with pure methods; signals wrap them at the app root.

pub mod connection;
pub mod kanban;
pub mod notifications;
pub mod ui;
