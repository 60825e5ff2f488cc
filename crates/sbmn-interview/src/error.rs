//! Error types for the interview

use sbmn_domain::StepError;
use thiserror::Error;

/// Errors that can occur while starting or driving an interview
#[derive(Error, Debug)]
pub enum InterviewError {
    /// Fewer than two distinct, non-empty activities
    #[error("At least 2 distinct activities are required, found {found}")]
    InsufficientActivities {
        /// Number of distinct activities supplied
        found: usize,
    },

    /// A required field is empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// An activity name appears more than once
    #[error("Duplicate activity: {0}")]
    DuplicateActivity(String),

    /// The session has not been started
    #[error("Interview has not been started")]
    NotStarted,

    /// Questions are still pending
    #[error("Interview still has questions pending")]
    InProgress,

    /// The step could not be taken
    #[error("Step error: {0}")]
    Step(#[from] StepError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Summary serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for InterviewError {
    fn from(e: serde_json::Error) -> Self {
        InterviewError::Serialization(e.to_string())
    }
}
