//! Step errors for the sequencer and classifier

use crate::{QuestionType, ResponseFormat};
use std::fmt;

/// Errors raised while classifying or advancing an interview step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// Every pair has already been questioned
    Finished,

    /// The validation does not fit the question being asked
    ValidationMismatch {
        /// Question being answered
        question: QuestionType,
        /// Format the question expects
        expected: ResponseFormat,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::Finished => write!(f, "All pairs have already been questioned"),
            StepError::ValidationMismatch { question, expected } => write!(
                f,
                "Question {} expects a {} validation",
                question,
                match expected {
                    ResponseFormat::Binary => "binary",
                    ResponseFormat::OpenEnumeration => "union selection",
                }
            ),
        }
    }
}

impl std::error::Error for StepError {}
