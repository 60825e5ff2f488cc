//! SBMN Domain Layer
//!
//! This crate contains the core interview logic and domain model for eliciting
//! declarative behavioral constraints between pairs of process activities.
//! It performs no I/O and defines the value objects, the pure decision rules,
//! and the trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Activity (AFO)**: An atomic activity or event of the process
//! - **Ordered Pair**: (A, B) with A ≠ B; (A, B) and (B, A) are separate questions
//! - **Question Cycle**: The fixed sequence of questions asked per pair
//! - **Validation**: The analyst's confirmation, the only source of truth
//! - **Relation**: A validated, classified constraint between two activities
//!
//! ## Decision Rules
//!
//! - [`classify`] maps a validated answer to a [`RelationKind`]
//! - [`Sequencer`] walks every pair through its question cycle
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activity;
pub mod answer;
pub mod classifier;
pub mod error;
pub mod pair;
pub mod question;
pub mod relation;
pub mod sequencer;
pub mod traits;

// Re-exports for convenience
pub use activity::{Activity, ProcessContext};
pub use answer::{Answer, UnionOption, UnionSelection, Validation};
pub use classifier::{classify, RecordingPolicy, XorPolarity};
pub use error::StepError;
pub use pair::{generate_pairs, OrderedPair};
pub use question::{QuestionCycle, QuestionType, ResponseFormat};
pub use relation::{Relation, RelationKind};
pub use sequencer::{Sequencer, Step, Transition};
pub use traits::{ChatRole, ChatTurn, DomainExpert, LlmProvider};
