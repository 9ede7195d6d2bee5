//! View Synchronizer
//!
//! Two independent read models, each paired with the commands that change it:
//!
//! - [`ActivitiesView`]: activity catalog, signup form, unregister controls
//! - [`TodoView`]: per-email todo list, todo form, toggle and delete controls
//!
//! Every fetch replaces its cache wholesale. Every command issues one request,
//! reports the result in the view's [`StatusBoard`], and on success re-fetches
//! the affected collection. Nothing is updated optimistically and nothing is
//! retried.

pub mod activities;
pub mod render;
pub mod status;
pub mod todos;

pub use activities::{ActivitiesRegion, ActivitiesView, SignupForm};
pub use render::{format_due_date, ActivityCard, ParticipantRow, Roster, TodoCard};
pub use status::{StatusBoard, StatusKind, StatusMessage};
pub use todos::{TodoForm, TodoMessageTtl, TodoView, TodosRegion, DELETE_PROMPT};

use crate::client::ClientError;

/// Fallback shown when the server rejects a request without a detail string
pub const GENERIC_ERROR: &str = "An error occurred";

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the command and the list was refreshed
    Completed,
    /// The server answered with an error status
    Rejected,
    /// No usable response
    Failed,
    /// The user declined the confirmation; nothing was sent
    Declined,
}

impl Outcome {
    pub fn from_error(err: &ClientError) -> Self {
        if err.is_rejection() {
            Outcome::Rejected
        } else {
            Outcome::Failed
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Message text for a failed command: the server's detail for rejections,
/// the operation's fixed text when the request never got an answer
pub(crate) fn failure_text(err: &ClientError, network_text: &str) -> String {
    if err.is_rejection() {
        err.detail().unwrap_or(GENERIC_ERROR).to_string()
    } else {
        network_text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_text() {
        let rejected = ClientError::Api {
            status: 400,
            detail: Some("Already signed up".to_string()),
        };
        assert_eq!(failure_text(&rejected, "Failed"), "Already signed up");

        let bare = ClientError::Api { status: 500, detail: None };
        assert_eq!(failure_text(&bare, "Failed"), GENERIC_ERROR);

        assert_eq!(failure_text(&ClientError::Timeout, "Failed to sign up."), "Failed to sign up.");
    }

    #[test]
    fn test_outcome_from_error() {
        assert_eq!(Outcome::from_error(&ClientError::Unavailable), Outcome::Failed);
        assert_eq!(
            Outcome::from_error(&ClientError::Api { status: 404, detail: None }),
            Outcome::Rejected
        );
        assert!(!Outcome::Declined.is_success());
    }
}
