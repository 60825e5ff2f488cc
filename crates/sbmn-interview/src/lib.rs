//! SBMN Interview
//!
//! Drives a structured interview that elicits behavioral constraints between
//! every ordered pair of process activities.
//!
//! # Overview
//!
//! An automated domain expert answers each templated question first; the
//! analyst then validates or overrides the answer. Validated answers are
//! classified into relations and checked for inconsistencies before the
//! interview moves on.
//!
//! # Architecture
//!
//! ```text
//! Activities → Sequencer → Question → Expert → Analyst → Classifier → Relations
//!                                                                   ↘ Gatekeeper → Findings
//! ```
//!
//! # Key Features
//!
//! - **Explicit session state**: one [`Session`] per interview, reset atomically
//! - **Two question cycles**: extended (DEP/DEPC/XOR/UNI) and simplified (DEP/XOR)
//! - **Configurable recording policy and XOR polarity**
//! - **Fail-soft expert**: expert failures become a literal answer, never an error
//! - **Advisory consistency checks**: findings never block progression
//!
//! # Example Usage
//!
//! ```
//! use sbmn_interview::{Interviewer, InterviewConfig, NextPrompt};
//! use sbmn_domain::Validation;
//! use sbmn_gatekeeper::Gatekeeper;
//! use sbmn_llm::{LlmExpert, MockProvider};
//!
//! let expert = LlmExpert::new(MockProvider::new("Sim"));
//! let interviewer = Interviewer::new(expert, Gatekeeper::default_config(), InterviewConfig::default());
//!
//! let mut session = interviewer
//!     .start("Vendas", "Varejo", &["Receber Pedido", "Validar Pagamento"])
//!     .unwrap();
//! assert_eq!(session.pending_pairs().len(), 2);
//!
//! let outcome = interviewer
//!     .submit_validation(&mut session, Validation::yes(), "")
//!     .unwrap();
//! assert!(matches!(outcome.next, NextPrompt::Ask(_)));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod input;
mod interviewer;
mod prompt;
mod session;
mod types;


pub use config::{DuplicatePolicy, InterviewConfig, Language};
pub use error::InterviewError;
pub use input::{distinct_activities, parse_activity_list};
pub use interviewer::Interviewer;
pub use prompt::QuestionTemplates;
pub use session::{Phase, Session, SessionId};
pub use types::{NextPrompt, Prompt, SessionSummary, StepOutcome, SummaryEntry};
