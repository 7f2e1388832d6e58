//! Kanban board state: application cards grouped by review status.
//!
//! SYSTEM CONTEXT
//! ==============
//! Cards reach this model from three directions: the page bootstrap (initial
//! server render), push `kanban_update` messages (authoritative), and local
//! drag-and-drop (optimistic). The push client and the page call into the
//! methods here; nothing else mutates the columns.
//!
//! DESIGN
//! ======
//! Column header counts are derived from the columns, never stored. Pending
//! optimistic moves remember where the card came from so a failed update can
//! put it back, and a push confirmation for the same card supersedes the
//! local guess. Inserts awaiting their card markup remember the latest status
//! pushed for them, so a decision that races the fetch still lands the card
//! in the right column.

#[cfg(test)]
#[path = "kanban_test.rs"]
mod kanban_test;

use std::collections::HashMap;

use frames::{ApplicationPayload, ApplicationStatus, BoardAction};
use serde::{Deserialize, Serialize};

use crate::state::ui::{DecisionModal, Notice, ToastKind};

/// Who is looking at the board. Supplied by the server at page load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    /// Reviews applications; may drag cards between columns.
    Approver,
    /// Watches their own applications; board is read-only.
    #[default]
    Applicant,
}

impl ViewerRole {
    #[must_use]
    pub fn can_drag(self) -> bool {
        self == Self::Approver
    }
}

/// What to do when the server rejects an optimistic move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveFailurePolicy {
    /// Revert locally and reload the page.
    #[default]
    Reload,
    /// Revert the card to its prior column and position only.
    Rollback,
}

/// One application card. `html` is server-rendered card markup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanCard {
    pub id: u64,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub html: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl ColumnCounts {
    #[must_use]
    pub fn get(&self, status: ApplicationStatus) -> usize {
        match status {
            ApplicationStatus::Pending => self.pending,
            ApplicationStatus::Approved => self.approved,
            ApplicationStatus::Rejected => self.rejected,
        }
    }
}

/// Next step for a `new_application` event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertPlan {
    /// Fetch the card markup, then call [`KanbanState::complete_insert`].
    Fetch,
    AlreadyPresent,
    AlreadyPending,
}

/// Status-update request produced by an optimistic move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusUpdate {
    pub id: u64,
    pub status: ApplicationStatus,
}

/// Why a drag was not turned into a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveRejected {
    ReadOnly,
    UnknownCard,
    SameColumn,
    InFlight,
}

/// Result of settling a failed status update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveFailure {
    /// Card reverted; the page must reload.
    Reload,
    /// Card reverted to its prior slot.
    RolledBack,
    /// A push confirmation already settled the card; nothing reverted.
    Superseded,
}

#[derive(Clone, Copy, Debug)]
struct PendingMove {
    from: ApplicationStatus,
    index: usize,
}

#[derive(Clone, Debug, Default)]
pub struct KanbanState {
    role: ViewerRole,
    failure_policy: MoveFailurePolicy,
    columns: [Vec<KanbanCard>; 3],
    inserting: HashMap<u64, ApplicationStatus>,
    moving: HashMap<u64, PendingMove>,
    reload_required: bool,
}

fn slot(status: ApplicationStatus) -> usize {
    match status {
        ApplicationStatus::Pending => 0,
        ApplicationStatus::Approved => 1,
        ApplicationStatus::Rejected => 2,
    }
}

fn display_name(app: &ApplicationPayload) -> String {
    if app.original_filename.is_empty() {
        format!("#{}", app.id)
    } else {
        app.original_filename.clone()
    }
}

/// Toast announcing a freshly inserted card.
#[must_use]
pub fn insertion_notice(app: &ApplicationPayload) -> Notice {
    Notice::Toast {
        kind: ToastKind::Info,
        message: format!("New application \"{}\" was added", display_name(app)),
    }
}

impl KanbanState {
    #[must_use]
    pub fn new(role: ViewerRole, failure_policy: MoveFailurePolicy) -> Self {
        Self { role, failure_policy, ..Self::default() }
    }

    /// Seed the board from server-rendered cards. Later duplicates of an id
    /// are dropped.
    #[must_use]
    pub fn from_cards(
        role: ViewerRole,
        failure_policy: MoveFailurePolicy,
        cards: impl IntoIterator<Item = KanbanCard>,
    ) -> Self {
        let mut state = Self::new(role, failure_policy);
        for card in cards {
            if state.locate(card.id).is_none() {
                state.columns[slot(card.status)].push(card);
            }
        }
        state
    }

    #[must_use]
    pub fn role(&self) -> ViewerRole {
        self.role
    }

    #[must_use]
    pub fn column(&self, status: ApplicationStatus) -> &[KanbanCard] {
        &self.columns[slot(status)]
    }

    /// Rendered cards per column.
    #[must_use]
    pub fn counts(&self) -> ColumnCounts {
        ColumnCounts {
            pending: self.column(ApplicationStatus::Pending).len(),
            approved: self.column(ApplicationStatus::Approved).len(),
            rejected: self.column(ApplicationStatus::Rejected).len(),
        }
    }

    /// Column and index of card `id`.
    #[must_use]
    pub fn locate(&self, id: u64) -> Option<(ApplicationStatus, usize)> {
        ApplicationStatus::ALL.into_iter().find_map(|status| {
            self.column(status)
                .iter()
                .position(|c| c.id == id)
                .map(|index| (status, index))
        })
    }

    #[must_use]
    pub fn is_moving(&self, id: u64) -> bool {
        self.moving.contains_key(&id)
    }

    /// True once a failed update demands a full page reload.
    #[must_use]
    pub fn reload_required(&self) -> bool {
        self.reload_required
    }

    fn take(&mut self, id: u64) -> Option<(ApplicationStatus, usize, KanbanCard)> {
        let (status, index) = self.locate(id)?;
        let card = self.columns[slot(status)].remove(index);
        Some((status, index, card))
    }

    // =========================================================================
    // PUSH EVENTS (authoritative)
    // =========================================================================

    /// Decide whether a `new_application` needs its card fetched.
    pub fn plan_insert(&mut self, app: &ApplicationPayload) -> InsertPlan {
        if self.locate(app.id).is_some() {
            return InsertPlan::AlreadyPresent;
        }
        if self.inserting.contains_key(&app.id) {
            return InsertPlan::AlreadyPending;
        }
        self.inserting.insert(app.id, app.status);
        InsertPlan::Fetch
    }

    /// Insert fetched markup at the top of the card's column. Returns `false`
    /// when the card is already on the board.
    pub fn complete_insert(&mut self, app: &ApplicationPayload, html: String) -> bool {
        let status = self.inserting.remove(&app.id).unwrap_or(app.status);
        if self.locate(app.id).is_some() {
            return false;
        }
        let card = KanbanCard { id: app.id, status, title: display_name(app), html };
        self.columns[slot(status)].insert(0, card);
        true
    }

    /// Forget an insert whose markup fetch failed.
    pub fn abandon_insert(&mut self, id: u64) {
        self.inserting.remove(&id);
    }

    /// Apply an approval or rejection pushed by the server and return the
    /// notice the viewer's role calls for. `new_application` yields `None`.
    pub fn apply_decision(&mut self, action: BoardAction, app: &ApplicationPayload) -> Option<Notice> {
        if action == BoardAction::NewApplication {
            return None;
        }
        let target = action.target_status();
        self.moving.remove(&app.id);
        if let Some(status) = self.inserting.get_mut(&app.id) {
            *status = target;
        }
        if let Some((from, index, mut card)) = self.take(app.id) {
            card.status = target;
            let column = &mut self.columns[slot(target)];
            if from == target {
                column.insert(index.min(column.len()), card);
            } else {
                column.push(card);
            }
        }

        let name = display_name(app);
        let approved = target == ApplicationStatus::Approved;
        Some(match self.role {
            ViewerRole::Approver => Notice::Toast {
                kind: if approved { ToastKind::Success } else { ToastKind::Warning },
                message: format!(
                    "Application \"{name}\" was {}",
                    if approved { "approved" } else { "rejected" }
                ),
            },
            ViewerRole::Applicant => Notice::Modal(DecisionModal { status: target, filename: name }),
        })
    }

    // =========================================================================
    // LOCAL MOVES (optimistic)
    // =========================================================================

    /// Move card `id` to `to` ahead of server confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejected`] when the viewer may not drag, the card is
    /// unknown, already in `to`, or has an update in flight.
    pub fn begin_move(&mut self, id: u64, to: ApplicationStatus) -> Result<StatusUpdate, MoveRejected> {
        if !self.role.can_drag() {
            return Err(MoveRejected::ReadOnly);
        }
        if self.moving.contains_key(&id) {
            return Err(MoveRejected::InFlight);
        }
        let (from, index) = self.locate(id).ok_or(MoveRejected::UnknownCard)?;
        if from == to {
            return Err(MoveRejected::SameColumn);
        }
        let (_, _, mut card) = self.take(id).ok_or(MoveRejected::UnknownCard)?;
        card.status = to;
        self.columns[slot(to)].push(card);
        self.moving.insert(id, PendingMove { from, index });
        Ok(StatusUpdate { id, status: to })
    }

    /// The server accepted the update to `status`; swap in its rendered
    /// markup. Markup for a status a push has since overridden is dropped.
    pub fn confirm_move(&mut self, id: u64, status: ApplicationStatus, html: String) -> bool {
        self.moving.remove(&id);
        let Some((current, index)) = self.locate(id) else {
            return false;
        };
        if current != status {
            return false;
        }
        self.columns[slot(current)][index].html = html;
        true
    }

    /// The server rejected the update.
    pub fn fail_move(&mut self, id: u64) -> MoveFailure {
        let pending = self.moving.remove(&id);
        if let Some(prior) = pending {
            if let Some((_, _, mut card)) = self.take(id) {
                card.status = prior.from;
                let column = &mut self.columns[slot(prior.from)];
                column.insert(prior.index.min(column.len()), card);
            }
        }
        match self.failure_policy {
            MoveFailurePolicy::Reload => {
                self.reload_required = true;
                MoveFailure::Reload
            }
            MoveFailurePolicy::Rollback if pending.is_some() => MoveFailure::RolledBack,
            MoveFailurePolicy::Rollback => MoveFailure::Superseded,
        }
    }
}
