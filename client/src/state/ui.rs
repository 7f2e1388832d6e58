//! Transient UI chrome: toast stack and blocking decision modals.
//!
//! DESIGN
//! ======
//! Keeps presentation-only feedback out of domain state (`kanban`,
//! `notifications`) so board logic can decide *what* to tell the viewer
//! without knowing how it is rendered.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use std::collections::VecDeque;
use std::time::Duration;

use frames::ApplicationStatus;

/// How long a toast stays before auto-hiding.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Visual tone of a toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    /// CSS modifier suffix, e.g. `toast--success`.
    #[must_use]
    pub fn modifier(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Blocking confirmation shown to an applicant when a decision lands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecisionModal {
    pub status: ApplicationStatus,
    pub filename: String,
}

impl DecisionModal {
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self.status {
            ApplicationStatus::Approved => "Your application was approved!",
            ApplicationStatus::Rejected => "About your application",
            ApplicationStatus::Pending => "Application updated",
        }
    }

    #[must_use]
    pub fn body(&self) -> &'static str {
        match self.status {
            ApplicationStatus::Approved => "The approver has formally approved it.",
            ApplicationStatus::Rejected => {
                "The approver rejected it. Please contact the approver for details."
            }
            ApplicationStatus::Pending => "The application is waiting for review.",
        }
    }
}

/// What a board event asks the viewer to see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Toast { kind: ToastKind, message: String },
    Modal(DecisionModal),
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub toasts: Vec<Toast>,
    next_toast_id: u64,
    modals: VecDeque<DecisionModal>,
}

impl UiState {
    /// Append a toast and return its id for scheduled dismissal.
    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast { id, kind, message: message.into() });
        id
    }

    pub fn dismiss_toast(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        before != self.toasts.len()
    }

    /// Modal currently blocking the page, if any.
    #[must_use]
    pub fn current_modal(&self) -> Option<&DecisionModal> {
        self.modals.front()
    }

    /// Close the current modal; the next queued one becomes current.
    pub fn close_modal(&mut self) -> Option<DecisionModal> {
        self.modals.pop_front()
    }

    /// Surface `notice`. Returns the toast id when a toast was pushed.
    pub fn present(&mut self, notice: Notice) -> Option<u64> {
        match notice {
            Notice::Toast { kind, message } => Some(self.push_toast(kind, message)),
            Notice::Modal(modal) => {
                self.modals.push_back(modal);
                None
            }
        }
    }
}
