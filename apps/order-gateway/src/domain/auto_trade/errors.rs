//! Auto-trade errors.

use std::fmt;

/// Errors returned by the auto-trade controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// The identity collaborator does not know the user.
    UnknownUser {
        /// User ID as supplied.
        user_id: String,
    },

    /// The identity collaborator could not be reached.
    IdentityUnavailable {
        /// Error message.
        message: String,
    },

    /// The signal evaluator refused or failed a (de)registration.
    EvaluatorUnavailable {
        /// Error message.
        message: String,
    },

    /// The rule store failed.
    Storage(String),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUser { user_id } => write!(f, "Unknown user: {user_id}"),
            Self::IdentityUnavailable { message } => {
                write!(f, "Identity service unavailable: {message}")
            }
            Self::EvaluatorUnavailable { message } => {
                write!(f, "Signal evaluator unavailable: {message}")
            }
            Self::Storage(message) => write!(f, "Rule storage failed: {message}"),
        }
    }
}

impl std::error::Error for ControllerError {}

/// Errors raised by an auto-trade rule repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Backing store failed.
    Backend(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(message) => write!(f, "Repository backend error: {message}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl From<RepositoryError> for ControllerError {
    fn from(err: RepositoryError) -> Self {
        Self::Storage(err.to_string())
    }
}
