//! Relation module - validated constraints between two activities

use crate::{Activity, OrderedPair, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of SBMN relation between two activities
///
/// Serialized as its SBMN code, the same text `Display` prints and
/// `FromStr` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// B does not depend on A
    #[serde(rename = "NO_DEP")]
    NoDependency,

    /// B can only start once A has occurred (DEP)
    #[serde(rename = "DEP")]
    StrictDependency,

    /// B depends on A only circumstantially (DEPC)
    #[serde(rename = "DEPC")]
    ConditionalDependency,

    /// A and B cannot occur in the same flow (XOR)
    #[serde(rename = "XOR")]
    Exclusive,

    /// A and B may occur in the same flow
    #[serde(rename = "NON_XOR")]
    NonExclusive,

    /// Only A, only B and both are all possible (UNI)
    #[serde(rename = "UNI")]
    InclusiveUnion,

    /// Union conditions not all satisfied
    #[serde(rename = "NON_UNI")]
    PartialUnion,
}

impl RelationKind {
    /// Short SBMN code
    pub fn code(&self) -> &'static str {
        match self {
            RelationKind::NoDependency => "NO_DEP",
            RelationKind::StrictDependency => "DEP",
            RelationKind::ConditionalDependency => "DEPC",
            RelationKind::Exclusive => "XOR",
            RelationKind::NonExclusive => "NON_XOR",
            RelationKind::InclusiveUnion => "UNI",
            RelationKind::PartialUnion => "NON_UNI",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            RelationKind::NoDependency => "no dependency",
            RelationKind::StrictDependency => "strict dependency",
            RelationKind::ConditionalDependency => "conditional dependency",
            RelationKind::Exclusive => "mutual exclusion",
            RelationKind::NonExclusive => "may co-occur",
            RelationKind::InclusiveUnion => "inclusive union",
            RelationKind::PartialUnion => "partial union",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for RelationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NO_DEP" => Ok(RelationKind::NoDependency),
            "DEP" => Ok(RelationKind::StrictDependency),
            "DEPC" => Ok(RelationKind::ConditionalDependency),
            "XOR" => Ok(RelationKind::Exclusive),
            "NON_XOR" => Ok(RelationKind::NonExclusive),
            "UNI" => Ok(RelationKind::InclusiveUnion),
            "NON_UNI" => Ok(RelationKind::PartialUnion),
            _ => Err(format!("Invalid relation kind: {}", s)),
        }
    }
}

/// A validated relation between two activities
///
/// Relations are append-only: once recorded they are never changed, only
/// discarded together with the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// First activity of the questioned pair
    pub activity_a: Activity,

    /// Second activity of the questioned pair
    pub activity_b: Activity,

    /// Classified kind
    pub kind: RelationKind,

    /// Answer given by the domain expert, verbatim
    pub expert_answer: String,

    /// The analyst's validation
    pub analyst_validation: Validation,

    /// Free-text analyst note (may be empty)
    pub analyst_note: String,
}

impl Relation {
    /// Create a new relation for a pair
    pub fn new(
        pair: &OrderedPair,
        kind: RelationKind,
        expert_answer: impl Into<String>,
        analyst_validation: Validation,
        analyst_note: impl Into<String>,
    ) -> Self {
        Self {
            activity_a: pair.a.clone(),
            activity_b: pair.b.clone(),
            kind,
            expert_answer: expert_answer.into(),
            analyst_validation,
            analyst_note: analyst_note.into(),
        }
    }

    /// The questioned pair
    pub fn pair(&self) -> OrderedPair {
        OrderedPair {
            a: self.activity_a.clone(),
            b: self.activity_b.clone(),
        }
    }

    /// Whether both relations cover the same two activities, in either order
    pub fn same_unordered_pair(&self, other: &Relation) -> bool {
        (self.activity_a == other.activity_a && self.activity_b == other.activity_b)
            || (self.activity_a == other.activity_b && self.activity_b == other.activity_a)
    }

    /// The analyst validation as rendered in summaries
    pub fn validation_text(&self) -> String {
        self.analyst_validation.describe(&self.pair())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_round_trip() {
        for kind in [
            RelationKind::NoDependency,
            RelationKind::StrictDependency,
            RelationKind::ConditionalDependency,
            RelationKind::Exclusive,
            RelationKind::NonExclusive,
            RelationKind::InclusiveUnion,
            RelationKind::PartialUnion,
        ] {
            assert_eq!(kind.code().parse::<RelationKind>(), Ok(kind));
        }
        assert!("SEQ".parse::<RelationKind>().is_err());
    }

    #[test]
    fn test_same_unordered_pair() {
        let ab = Relation::new(
            &OrderedPair::new("A", "B"),
            RelationKind::StrictDependency,
            "Sim",
            Validation::yes(),
            "",
        );
        let ba = Relation::new(
            &OrderedPair::new("B", "A"),
            RelationKind::Exclusive,
            "Não",
            Validation::no(),
            "",
        );
        let ac = Relation::new(
            &OrderedPair::new("A", "C"),
            RelationKind::Exclusive,
            "Não",
            Validation::no(),
            "",
        );
        assert!(ab.same_unordered_pair(&ba));
        assert!(!ab.same_unordered_pair(&ac));
    }
}
