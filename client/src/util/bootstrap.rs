//! Page bootstrap handed over by the server.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders a `<script id="board-bootstrap" type="application/json">`
//! element carrying the viewer role, the initial cards, and optional reconnect
//! tuning. Both the SSR shell and the hydrating client build their state from
//! the same document so the first client render matches the server's.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use std::time::Duration;

use frames::lifecycle::ReconnectPolicy;
use serde::{Deserialize, Serialize};

use crate::state::kanban::{KanbanCard, KanbanState, MoveFailurePolicy, ViewerRole};

pub const BOOTSTRAP_ELEMENT_ID: &str = "board-bootstrap";

/// Everything the page needs before the push connection opens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBootstrap {
    #[serde(default)]
    pub role: ViewerRole,
    #[serde(default)]
    pub move_failure: MoveFailurePolicy,
    #[serde(default)]
    pub cards: Vec<KanbanCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconnect_base_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconnect_max_attempts: Option<u32>,
}

impl PageBootstrap {
    /// # Errors
    ///
    /// Returns the JSON error when `text` is not a valid bootstrap document.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// JSON safe to embed inside a `<script>` element.
    #[must_use]
    pub fn to_script_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| "{}".to_owned())
            .replace('<', "\\u003c")
    }

    /// Reconnect policy with any server overrides applied.
    #[must_use]
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        let mut policy = ReconnectPolicy::default();
        if let Some(ms) = self.reconnect_base_delay_ms {
            policy.base_delay = Duration::from_millis(ms);
        }
        if let Some(max) = self.reconnect_max_attempts {
            policy.max_attempts = max;
        }
        policy
    }

    #[must_use]
    pub fn kanban_state(&self) -> KanbanState {
        KanbanState::from_cards(self.role, self.move_failure, self.cards.iter().cloned())
    }
}

/// Read the bootstrap document from the current page.
///
/// A missing or malformed element yields the default (read-only, empty board).
pub fn read() -> PageBootstrap {
    #[cfg(feature = "hydrate")]
    {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(BOOTSTRAP_ELEMENT_ID))
            .and_then(|el| el.text_content());
        let Some(text) = text else {
            leptos::logging::warn!("page bootstrap element missing; board is read-only");
            return PageBootstrap::default();
        };
        PageBootstrap::parse(&text).unwrap_or_else(|e| {
            leptos::logging::warn!("page bootstrap invalid: {e}");
            PageBootstrap::default()
        })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        PageBootstrap::default()
    }
}
