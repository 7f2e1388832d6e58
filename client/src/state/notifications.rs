//! Notification feed state: the transient cards shown in the corner stack.
//!
//! DESIGN
//! ======
//! The unread counter is derived from the displayed cards rather than tracked
//! separately, so it self-corrects on every render and removal. Each shown
//! card carries an expiry token; a timer scheduled for an earlier showing of
//! the same id cannot remove a later one.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use std::collections::HashSet;
use std::time::Duration;

use frames::NotificationPayload;

/// How long a card stays on screen, read or not.
pub const AUTO_EXPIRE: Duration = Duration::from_secs(10);

/// Badge shows this many before collapsing to `99+`.
const BADGE_MAX: usize = 99;

/// One rendered notification card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationCard {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub time_ago: String,
    pub read: bool,
    token: u64,
}

/// Displayed notification cards, newest first.
#[derive(Clone, Debug, Default)]
pub struct NotificationFeed {
    cards: Vec<NotificationCard>,
    next_token: u64,
    marking: HashSet<u64>,
}

impl NotificationFeed {
    #[must_use]
    pub fn cards(&self) -> &[NotificationCard] {
        &self.cards
    }

    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    /// Render `payload` at the top of the stack.
    ///
    /// Returns the expiry token to schedule, or `None` when a card with the
    /// same id is already displayed.
    pub fn show(&mut self, payload: &NotificationPayload) -> Option<u64> {
        if self.contains(payload.id) {
            return None;
        }
        self.next_token += 1;
        let token = self.next_token;
        self.cards.insert(
            0,
            NotificationCard {
                id: payload.id,
                title: payload.title.clone(),
                message: payload.message.clone(),
                time_ago: payload.time_ago.clone(),
                read: payload.is_read,
                token,
            },
        );
        Some(token)
    }

    /// Remove the card if it is still the showing identified by `token`.
    pub fn expire(&mut self, id: u64, token: u64) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| !(c.id == id && c.token == token));
        before != self.cards.len()
    }

    /// Remove the card with `id`, whatever showing it is.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        self.marking.remove(&id);
        before != self.cards.len()
    }

    /// Remove every card. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.cards.len();
        self.cards.clear();
        self.marking.clear();
        removed
    }

    /// Claim a mark-read request for `id`.
    ///
    /// Returns `false` when the card is not displayed or a request for it is
    /// already in flight; the caller then sends nothing.
    pub fn begin_mark_read(&mut self, id: u64) -> bool {
        self.contains(id) && self.marking.insert(id)
    }

    /// Settle a mark-read request. The card leaves the stack only when the
    /// server accepted it.
    pub fn finish_mark_read(&mut self, id: u64, accepted: bool) -> bool {
        self.marking.remove(&id);
        if accepted { self.remove(id) } else { false }
    }

    #[must_use]
    pub fn is_marking(&self, id: u64) -> bool {
        self.marking.contains(&id)
    }

    /// Number of displayed cards not yet read.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.read).count()
    }

    /// Badge text, or `None` to hide the badge.
    #[must_use]
    pub fn badge_label(&self) -> Option<String> {
        match self.unread_count() {
            0 => None,
            n if n > BADGE_MAX => Some(format!("{BADGE_MAX}+")),
            n => Some(n.to_string()),
        }
    }
}
