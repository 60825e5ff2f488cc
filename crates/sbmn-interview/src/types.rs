//! Prompt, outcome, and summary types

use sbmn_domain::{Activity, OrderedPair, QuestionType, Relation, RelationKind, ResponseFormat};
use sbmn_gatekeeper::Finding;
use serde::Serialize;

/// One question put to the analyst, with the expert's answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    /// Pair under analysis
    pub pair: OrderedPair,

    /// Index of the pair in the pending-pair list
    pub pair_index: usize,

    /// Total number of pending pairs
    pub total_pairs: usize,

    /// Question type
    pub question_type: QuestionType,

    /// Rendered question text
    pub question: String,

    /// Expected shape of the answer
    pub format: ResponseFormat,

    /// The expert's answer, verbatim
    pub expert_answer: String,
}

/// What comes after a submitted validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NextPrompt {
    /// Another question
    Ask(Prompt),
    /// Every pair has been questioned
    Done,
}

/// Result of one interview step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    /// Relation recorded by this step, if any
    pub recorded: Option<Relation>,

    /// Inconsistencies raised by the recorded relation
    pub findings: Vec<Finding>,

    /// Next question or the end of the interview
    pub next: NextPrompt,
}

/// One recorded relation as shown in the summary:
/// `(activity_a, kind, activity_b, expert_answer, validation, note)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    /// First activity
    pub activity_a: String,
    /// Relation kind
    pub kind: RelationKind,
    /// Second activity
    pub activity_b: String,
    /// Expert answer, verbatim
    pub expert_answer: String,
    /// Rendered analyst validation
    pub validation: String,
    /// Analyst note
    pub note: String,
}

impl From<&Relation> for SummaryEntry {
    fn from(relation: &Relation) -> Self {
        Self {
            activity_a: relation.activity_a.name().to_string(),
            kind: relation.kind,
            activity_b: relation.activity_b.name().to_string(),
            expert_answer: relation.expert_answer.clone(),
            validation: relation.validation_text(),
            note: relation.analyst_note.clone(),
        }
    }
}

/// Everything the analyst sees at the end of an interview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Process name
    pub process_name: String,

    /// Process domain
    pub domain: String,

    /// Activities, in interview order
    pub activities: Vec<Activity>,

    /// Recorded relations, in recording order
    pub relations: Vec<SummaryEntry>,

    /// Inconsistencies raised during the interview
    pub findings: Vec<Finding>,

    /// Anything else the analyst noted when the interview closed
    #[serde(skip_serializing_if = "String::is_empty")]
    pub closing_note: String,
}

impl SessionSummary {
    /// Serialize the summary to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, crate::InterviewError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbmn_domain::{UnionSelection, Validation};

    #[test]
    fn test_summary_entry_from_relation() {
        let pair = OrderedPair::new("A", "B");
        let relation = Relation::new(
            &pair,
            RelationKind::PartialUnion,
            "apenas A",
            Validation::Union(UnionSelection::new()),
            "revisar",
        );

        let entry = SummaryEntry::from(&relation);
        assert_eq!(entry.activity_a, "A");
        assert_eq!(entry.kind, RelationKind::PartialUnion);
        assert_eq!(entry.activity_b, "B");
        assert_eq!(entry.expert_answer, "apenas A");
        assert_eq!(entry.validation, "Nenhuma das opções selecionadas");
        assert_eq!(entry.note, "revisar");
    }

    #[test]
    fn test_next_prompt_json_tag() {
        let json = serde_json::to_value(NextPrompt::Done).unwrap();
        assert_eq!(json["status"], "done");
    }
}
