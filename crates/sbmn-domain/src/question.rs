//! Question types and the cycles they are asked in

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of relation question asked about an ordered pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Does B depend on A? (extended cycle)
    DependencyInitial,

    /// Is that dependency mandatory? Asked only after an affirmative initial answer
    DependencyComplementary,

    /// Can (or cannot) A and B occur together in the same flow?
    Exclusion,

    /// Which of "only A", "only B", "both" are possible?
    Union,

    /// Does B depend on A? (simplified cycle, no complementary follow-up)
    Dependency,
}

impl QuestionType {
    /// Stable code used in logs and summaries
    pub fn code(&self) -> &'static str {
        match self {
            QuestionType::DependencyInitial => "DEP_INITIAL",
            QuestionType::DependencyComplementary => "DEP_COMPLEMENTARY",
            QuestionType::Exclusion => "XOR",
            QuestionType::Union => "UNION",
            QuestionType::Dependency => "DEPENDENCY",
        }
    }

    /// Shape of the answer the expert is asked to give
    pub fn response_format(&self) -> ResponseFormat {
        match self {
            QuestionType::Union => ResponseFormat::OpenEnumeration,
            QuestionType::DependencyInitial
            | QuestionType::DependencyComplementary
            | QuestionType::Exclusion
            | QuestionType::Dependency => ResponseFormat::Binary,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Expected shape of an expert answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// "Sim" or "Não"
    Binary,

    /// Any combination of the enumerated options
    OpenEnumeration,
}

/// Fixed, ordered sequence of questions asked for every pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCycle {
    /// DEP_INITIAL → (DEP_COMPLEMENTARY) → XOR → UNION
    #[default]
    Extended,

    /// DEPENDENCY → XOR
    Simplified,
}

impl QuestionCycle {
    /// First question asked for each pair
    pub fn first(&self) -> QuestionType {
        match self {
            QuestionCycle::Extended => QuestionType::DependencyInitial,
            QuestionCycle::Simplified => QuestionType::Dependency,
        }
    }

    /// Whether a question type belongs to this cycle
    pub fn contains(&self, question: QuestionType) -> bool {
        match self {
            QuestionCycle::Extended => !matches!(question, QuestionType::Dependency),
            QuestionCycle::Simplified => {
                matches!(question, QuestionType::Dependency | QuestionType::Exclusion)
            }
        }
    }

    /// Fewest questions asked for a single pair
    pub fn min_steps_per_pair(&self) -> usize {
        match self {
            QuestionCycle::Extended => 3,
            QuestionCycle::Simplified => 2,
        }
    }

    /// Most questions asked for a single pair
    pub fn max_steps_per_pair(&self) -> usize {
        match self {
            QuestionCycle::Extended => 4,
            QuestionCycle::Simplified => 2,
        }
    }
}

impl std::str::FromStr for QuestionCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extended" => Ok(QuestionCycle::Extended),
            "simplified" => Ok(QuestionCycle::Simplified),
            _ => Err(format!("Invalid question cycle: {}", s)),
        }
    }
}
