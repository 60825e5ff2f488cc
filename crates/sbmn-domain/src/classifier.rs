//! Relation classifier
//!
//! Maps a (question, validation) pair to a relation kind. Classification is
//! a pure function; whether the result is recorded at all is decided
//! separately by the [`RecordingPolicy`].

use crate::{Answer, QuestionType, RelationKind, StepError, Validation};
use serde::{Deserialize, Serialize};

/// Literal polarity of the exclusion question
///
/// The mapping from answer to relation kind follows the wording actually
/// asked, so the two must always be configured together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XorPolarity {
    /// "Can A and B occur together?" - a negative answer means XOR
    #[default]
    CanCoOccur,

    /// "Can A and B NOT occur together?" - an affirmative answer means XOR
    CannotCoOccur,
}

impl XorPolarity {
    /// Whether the answer marks the pair as mutually exclusive
    pub fn is_exclusive(&self, answer: Answer) -> bool {
        match self {
            XorPolarity::CanCoOccur => !answer.is_affirmative(),
            XorPolarity::CannotCoOccur => answer.is_affirmative(),
        }
    }
}

impl std::str::FromStr for XorPolarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "can_co_occur" => Ok(XorPolarity::CanCoOccur),
            "cannot_co_occur" => Ok(XorPolarity::CannotCoOccur),
            _ => Err(format!("Invalid XOR polarity: {}", s)),
        }
    }
}

/// Which classified relations end up in the relation list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingPolicy {
    /// Record every classified relation, negative outcomes included
    #[default]
    Always,

    /// Record only relations that assert a constraint: NO_DEP and NON_XOR
    /// are dropped, union outcomes are always recorded
    AffirmativeOnly,
}

impl RecordingPolicy {
    /// Whether a relation of this kind is recorded
    ///
    /// Decided on the classified kind rather than the raw answer, so a "Não"
    /// that classifies as XOR or DEPC is kept whatever the XOR polarity.
    pub fn admits(&self, kind: RelationKind) -> bool {
        match self {
            RecordingPolicy::Always => true,
            RecordingPolicy::AffirmativeOnly => !matches!(
                kind,
                RelationKind::NoDependency | RelationKind::NonExclusive
            ),
        }
    }
}

impl std::str::FromStr for RecordingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "always" => Ok(RecordingPolicy::Always),
            "affirmative_only" => Ok(RecordingPolicy::AffirmativeOnly),
            _ => Err(format!("Invalid recording policy: {}", s)),
        }
    }
}

/// Classify a validated answer
///
/// Returns `Ok(None)` when the question does not produce a relation on its
/// own: an affirmative initial dependency answer is resolved by the
/// complementary question that follows it.
///
/// # Examples
///
/// ```
/// use sbmn_domain::{classify, QuestionType, RelationKind, Validation, XorPolarity};
///
/// let kind = classify(QuestionType::Exclusion, &Validation::no(), XorPolarity::CanCoOccur);
/// assert_eq!(kind, Ok(Some(RelationKind::Exclusive)));
/// ```
pub fn classify(
    question: QuestionType,
    validation: &Validation,
    polarity: XorPolarity,
) -> Result<Option<RelationKind>, StepError> {
    if validation.format() != question.response_format() {
        return Err(StepError::ValidationMismatch {
            question,
            expected: question.response_format(),
        });
    }

    let kind = match (question, validation) {
        (QuestionType::DependencyInitial, Validation::Binary(Answer::Affirmative)) => None,
        (QuestionType::DependencyInitial, Validation::Binary(Answer::Negative)) => {
            Some(RelationKind::NoDependency)
        }
        (QuestionType::DependencyComplementary, Validation::Binary(Answer::Affirmative))
        | (QuestionType::Dependency, Validation::Binary(Answer::Affirmative)) => {
            Some(RelationKind::StrictDependency)
        }
        (QuestionType::DependencyComplementary, Validation::Binary(Answer::Negative)) => {
            Some(RelationKind::ConditionalDependency)
        }
        (QuestionType::Dependency, Validation::Binary(Answer::Negative)) => {
            Some(RelationKind::NoDependency)
        }
        (QuestionType::Exclusion, Validation::Binary(answer)) => {
            if polarity.is_exclusive(*answer) {
                Some(RelationKind::Exclusive)
            } else {
                Some(RelationKind::NonExclusive)
            }
        }
        (QuestionType::Union, Validation::Union(selection)) => {
            if selection.is_complete() {
                Some(RelationKind::InclusiveUnion)
            } else {
                Some(RelationKind::PartialUnion)
            }
        }
        (question, _) => {
            return Err(StepError::ValidationMismatch {
                question,
                expected: question.response_format(),
            })
        }
    };

    Ok(kind)
}
