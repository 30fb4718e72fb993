//! Transient notifications shown after an operation.
//!
//! At most one notice is visible at a time; a newer notice replaces the
//! current one and the page hides it after the configured delay.

use serde::{Deserialize, Serialize};

pub const USER_ADDED: &str = "User added successfully!";
pub const USER_UPDATED: &str = "User updated successfully!";
pub const USER_DELETED: &str = "User deleted successfully!";
pub const SAVE_FAILED: &str = "Error saving user.";
pub const DELETE_FAILED: &str = "Error deleting user.";
pub const LOAD_FAILED: &str = "Error loading users.";

/// Notice severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    /// Returns the CSS class name for this notice kind.
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "notice-success",
            Self::Error => "notice-error",
        }
    }

    /// ARIA role, so screen readers announce errors assertively.
    #[must_use]
    pub fn role(&self) -> &'static str {
        match self {
            Self::Error => "alert",
            Self::Success => "status",
        }
    }
}

/// A single notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
