//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ProcessContext, ResponseFormat};

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// Instructions for the model, kept apart from the dialogue
    System,

    /// The interviewer
    User,

    /// The language model
    Model,
}

/// One turn of a conversation with a language model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// Who is speaking
    pub role: ChatRole,

    /// What is said
    pub text: String,
}

impl ChatTurn {
    /// A system instruction
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            text: text.into(),
        }
    }

    /// A turn by the interviewer
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    /// A turn by the model
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (sbmn-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate the next model turn for a conversation
    fn generate(&self, conversation: &[ChatTurn]) -> Result<String, Self::Error>;
}

/// The automated domain expert answering interview questions
///
/// Implementations never fail: a broken round trip degrades to a sentinel
/// answer text that the analyst can reject like any other answer.
pub trait DomainExpert {
    /// Ask one question about the process and return the answer text verbatim
    fn ask(&self, context: &ProcessContext, question: &str, format: ResponseFormat) -> String;
}

impl<T: DomainExpert + ?Sized> DomainExpert for Box<T> {
    fn ask(&self, context: &ProcessContext, question: &str, format: ResponseFormat) -> String {
        (**self).ask(context, question, format)
    }
}

impl<T: DomainExpert + ?Sized> DomainExpert for &T {
    fn ask(&self, context: &ProcessContext, question: &str, format: ResponseFormat) -> String {
        (**self).ask(context, question, format)
    }
}
