//! Interview session state
//!
//! A [`Session`] owns everything one interview accumulates. It is mutated
//! only through the [`Interviewer`](crate::Interviewer), one step at a time;
//! concurrent interviews each need their own session.

use crate::{Prompt, SessionSummary, SummaryEntry};
use sbmn_domain::{
    Activity, OrderedPair, ProcessContext, QuestionCycle, QuestionType, Relation, Sequencer,
    UnionOption, UnionSelection,
};
use sbmn_gatekeeper::Finding;
use serde::Serialize;
use std::fmt;

/// Unique identifier for a session based on UUIDv7
///
/// Identifiers sort chronologically, so transcripts of several interviews
/// can be ordered without extra metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u128);

impl SessionId {
    /// Generate a new UUIDv7-based SessionId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse a SessionId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid session id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for SessionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Stage of the interview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Collecting process name, domain, and activities
    #[default]
    Introduction,
    /// Questioning pairs
    Interviewing,
    /// Every pair has been questioned
    Closing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Introduction => "introduction",
            Phase::Interviewing => "interviewing",
            Phase::Closing => "closing",
        };
        f.write_str(name)
    }
}

/// State of one interview
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    pub(crate) phase: Phase,
    pub(crate) context: ProcessContext,
    pub(crate) activities: Vec<Activity>,
    pub(crate) sequencer: Sequencer,
    pub(crate) relations: Vec<Relation>,
    pub(crate) findings: Vec<Finding>,
    pub(crate) staged_union: UnionSelection,
    pub(crate) prompt: Option<Prompt>,
    pub(crate) closing_note: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// An empty session in the introduction phase
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            phase: Phase::Introduction,
            context: ProcessContext::new("", ""),
            activities: Vec::new(),
            sequencer: Sequencer::empty(QuestionCycle::default()),
            relations: Vec::new(),
            findings: Vec::new(),
            staged_union: UnionSelection::new(),
            prompt: None,
            closing_note: String::new(),
        }
    }

    /// Clear all state, returning to an empty introduction-phase session
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Session identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Process name and domain
    pub fn context(&self) -> &ProcessContext {
        &self.context
    }

    /// Activities, de-duplicated, in input order
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Every ordered pair, in questioning order
    pub fn pending_pairs(&self) -> &[OrderedPair] {
        self.sequencer.pairs()
    }

    /// Index of the pair under analysis
    pub fn pair_index(&self) -> usize {
        self.sequencer.pair_index()
    }

    /// Question type the session is positioned on
    pub fn question(&self) -> QuestionType {
        self.sequencer.question()
    }

    /// Question cycle in use
    pub fn cycle(&self) -> QuestionCycle {
        self.sequencer.cycle()
    }

    /// Recorded relations, in recording order
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Inconsistencies raised so far
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// The question awaiting validation, with the expert's answer
    pub fn current_prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Whether every pair has been questioned
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Closing
    }

    /// Analyst's answer to the closing question, empty until given
    pub fn closing_note(&self) -> &str {
        &self.closing_note
    }

    /// Tick or untick a union option for the current question
    pub fn stage_union_option(&mut self, option: UnionOption, checked: bool) {
        self.staged_union.set(option, checked);
    }

    /// Union options ticked so far for the current question
    pub fn staged_union(&self) -> UnionSelection {
        self.staged_union
    }

    /// Summary of the interview so far
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            process_name: self.context.process_name.clone(),
            domain: self.context.domain.clone(),
            activities: self.activities.clone(),
            relations: self.relations.iter().map(SummaryEntry::from).collect(),
            findings: self.findings.clone(),
            closing_note: self.closing_note.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Introduction);
        assert!(session.activities().is_empty());
        assert!(session.pending_pairs().is_empty());
        assert!(session.relations().is_empty());
        assert_eq!(session.pair_index(), 0);
        assert!(session.current_prompt().is_none());
        assert!(!session.is_done());
    }

    #[test]
    fn test_staged_union() {
        let mut session = Session::new();
        session.stage_union_option(UnionOption::OnlyA, true);
        session.stage_union_option(UnionOption::Both, true);
        session.stage_union_option(UnionOption::Both, false);

        let staged = session.staged_union();
        assert!(staged.contains(UnionOption::OnlyA));
        assert!(!staged.contains(UnionOption::Both));
    }

    #[test]
    fn test_reset_clears_staged_union() {
        let mut session = Session::new();
        let id = session.id();
        session.stage_union_option(UnionOption::OnlyB, true);
        session.reset();
        assert!(session.staged_union().is_empty());
        assert_ne!(session.id(), id);
    }

    #[test]
    fn test_session_id_round_trip() {
        let id = SessionId::new();
        let parsed = SessionId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(SessionId::from_string("not-a-uuid").is_err());
    }
}
