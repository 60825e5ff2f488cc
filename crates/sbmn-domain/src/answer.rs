//! Analyst validations
//!
//! The analyst's validation is the only source of truth for recorded
//! relations. Binary questions are validated with "Sim"/"Não"; the union
//! question is validated by ticking the situations that are possible.

use crate::OrderedPair;
use serde::{Deserialize, Serialize};

/// Affirmative or negative answer to a binary question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// "Sim"
    Affirmative,

    /// "Não"
    Negative,
}

impl Answer {
    /// Whether the answer is affirmative
    pub fn is_affirmative(&self) -> bool {
        matches!(self, Answer::Affirmative)
    }

    /// Label shown to the analyst and stored in summaries
    pub fn label(&self) -> &'static str {
        match self {
            Answer::Affirmative => "Sim",
            Answer::Negative => "Não",
        }
    }

    /// Parse a typed answer (Portuguese or English, case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sim" | "s" | "yes" | "y" => Some(Answer::Affirmative),
            "não" | "nao" | "n" | "no" => Some(Answer::Negative),
            _ => None,
        }
    }
}

impl std::str::FromStr for Answer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid answer: {}", s))
    }
}

/// One of the three situations offered by the union question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnionOption {
    /// Only A occurs
    OnlyA,

    /// Only B occurs
    OnlyB,

    /// Both A and B occur
    Both,
}

impl UnionOption {
    /// All options, in display order
    pub const ALL: [UnionOption; 3] = [UnionOption::OnlyA, UnionOption::OnlyB, UnionOption::Both];

    /// Render the option for a concrete pair
    pub fn describe(&self, pair: &OrderedPair) -> String {
        match self {
            UnionOption::OnlyA => format!("Apenas {}", pair.a),
            UnionOption::OnlyB => format!("Apenas {}", pair.b),
            UnionOption::Both => format!("Ambos {} e {}", pair.a, pair.b),
        }
    }
}

/// Set of union options ticked by the analyst
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnionSelection {
    only_a: bool,
    only_b: bool,
    both: bool,
}

impl UnionSelection {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection with every option ticked
    pub fn all() -> Self {
        Self {
            only_a: true,
            only_b: true,
            both: true,
        }
    }

    /// Build a selection from a list of options
    pub fn from_options(options: &[UnionOption]) -> Self {
        let mut selection = Self::new();
        for option in options {
            selection.set(*option, true);
        }
        selection
    }

    /// Tick or untick an option
    pub fn set(&mut self, option: UnionOption, checked: bool) {
        match option {
            UnionOption::OnlyA => self.only_a = checked,
            UnionOption::OnlyB => self.only_b = checked,
            UnionOption::Both => self.both = checked,
        }
    }

    /// Whether an option is ticked
    pub fn contains(&self, option: UnionOption) -> bool {
        match option {
            UnionOption::OnlyA => self.only_a,
            UnionOption::OnlyB => self.only_b,
            UnionOption::Both => self.both,
        }
    }

    /// Ticked options, in display order
    pub fn options(&self) -> Vec<UnionOption> {
        UnionOption::ALL
            .iter()
            .copied()
            .filter(|o| self.contains(*o))
            .collect()
    }

    /// Whether all three situations were ticked
    pub fn is_complete(&self) -> bool {
        self.only_a && self.only_b && self.both
    }

    /// Whether nothing was ticked
    pub fn is_empty(&self) -> bool {
        !(self.only_a || self.only_b || self.both)
    }

    /// Render the selection for a concrete pair
    pub fn describe(&self, pair: &OrderedPair) -> String {
        if self.is_empty() {
            return "Nenhuma das opções selecionadas".to_string();
        }
        self.options()
            .iter()
            .map(|o| o.describe(pair))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The analyst's validation of one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Answer to a binary question
    Binary(Answer),

    /// Ticked options of the union question
    Union(UnionSelection),
}

impl Validation {
    /// Shorthand for `Validation::Binary(Answer::Affirmative)`
    pub fn yes() -> Self {
        Validation::Binary(Answer::Affirmative)
    }

    /// Shorthand for `Validation::Binary(Answer::Negative)`
    pub fn no() -> Self {
        Validation::Binary(Answer::Negative)
    }

    /// The binary answer, if this validates a binary question
    pub fn answer(&self) -> Option<Answer> {
        match self {
            Validation::Binary(answer) => Some(*answer),
            Validation::Union(_) => None,
        }
    }

    /// Response format this validation fits
    pub fn format(&self) -> crate::ResponseFormat {
        match self {
            Validation::Binary(_) => crate::ResponseFormat::Binary,
            Validation::Union(_) => crate::ResponseFormat::OpenEnumeration,
        }
    }

    /// Render the validation as recorded in summaries
    pub fn describe(&self, pair: &OrderedPair) -> String {
        match self {
            Validation::Binary(answer) => answer.label().to_string(),
            Validation::Union(selection) => selection.describe(pair),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_parsing() {
        assert_eq!(Answer::parse("Sim"), Some(Answer::Affirmative));
        assert_eq!(Answer::parse(" s "), Some(Answer::Affirmative));
        assert_eq!(Answer::parse("YES"), Some(Answer::Affirmative));
        assert_eq!(Answer::parse("Não"), Some(Answer::Negative));
        assert_eq!(Answer::parse("nao"), Some(Answer::Negative));
        assert_eq!(Answer::parse("talvez"), None);
    }

    #[test]
    fn test_union_selection_describe() {
        let pair = OrderedPair::new("A", "B");
        let selection = UnionSelection::from_options(&[UnionOption::Both, UnionOption::OnlyA]);
        assert_eq!(selection.describe(&pair), "Apenas A, Ambos A e B");
        assert_eq!(
            UnionSelection::all().describe(&pair),
            "Apenas A, Apenas B, Ambos A e B"
        );
        assert_eq!(
            UnionSelection::new().describe(&pair),
            "Nenhuma das opções selecionadas"
        );
    }

    #[test]
    fn test_union_selection_toggle() {
        let mut selection = UnionSelection::new();
        assert!(selection.is_empty());
        selection.set(UnionOption::OnlyB, true);
        assert!(selection.contains(UnionOption::OnlyB));
        selection.set(UnionOption::OnlyB, false);
        assert!(selection.is_empty());
        assert!(!selection.is_complete());
    }

    #[test]
    fn test_validation_describe() {
        let pair = OrderedPair::new("A", "B");
        assert_eq!(Validation::yes().describe(&pair), "Sim");
        assert_eq!(Validation::no().describe(&pair), "Não");
        assert_eq!(Validation::Union(UnionSelection::new()).answer(), None);
    }
}
