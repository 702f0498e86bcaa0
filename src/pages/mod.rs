//! Console pages that submit forms.
//!
//! Each page validates its form locally, calls one API endpoint and reports
//! the result as a notification plus an optional navigation target.

mod change_password;
mod contact;
mod extra;
mod login;
mod notify;
mod team_editor;

pub use change_password::*;
pub use contact::*;
pub use extra::*;
pub use login::*;
pub use notify::*;
pub use team_editor::*;

use crate::errors::{AppError, FormErrors};

/// Fallback shown when a rejected call carries no server message.
pub const GENERIC_ERROR: &str = "Something went wrong";

/// How a form submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blocked by local validation; nothing was sent
    Invalid(FormErrors),
    /// The call was rejected and an error notification was shown
    Failed,
    /// The call succeeded; move to `navigate` when set
    Completed { navigate: Option<&'static str> },
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed { .. })
    }
}

/// Unwrap a query result, raising an error notification when it failed.
pub fn loaded<T>(notifier: &dyn Notifier, result: Result<T, AppError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Query failed: {}", e);
            notifier.notify(Notification::error(e.user_message(GENERIC_ERROR)));
            None
        }
    }
}
