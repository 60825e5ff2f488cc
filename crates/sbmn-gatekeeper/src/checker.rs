//! Relation consistency checks

use crate::ConsistencyConfig;
use sbmn_domain::{Activity, Relation, RelationKind};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Kind of inconsistency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// A strict dependency and a mutual exclusion over the same two activities
    EquivalentOperators,
}

impl FindingKind {
    /// Name of the inconsistency pattern
    pub fn name(&self) -> &'static str {
        match self {
            FindingKind::EquivalentOperators => "Equivalent Operators",
        }
    }
}

/// An advisory inconsistency finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Pattern detected
    pub kind: FindingKind,

    /// First activity of the newly recorded relation
    pub activity_a: Activity,

    /// Second activity of the newly recorded relation
    pub activity_b: Activity,

    /// Kind of the newly recorded relation
    pub new_kind: RelationKind,

    /// Kind of the earlier relation it conflicts with
    pub conflicting_kind: RelationKind,
}

impl Finding {
    /// Message shown to the analyst
    pub fn message(&self) -> String {
        format!(
            "Inconsistência detectada ({}): as tarefas '{}' e '{}' possuem uma relação {} e uma relação {}. \
Uma exige que uma dependa da outra e a outra impede que ocorram juntas, o que é contraditório. \
Por favor, reavalie a relação para esse par.",
            self.kind.name(),
            self.activity_a,
            self.activity_b,
            self.new_kind,
            self.conflicting_kind,
        )
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// The Gatekeeper checks newly recorded relations against the relation set
pub struct Gatekeeper {
    config: ConsistencyConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ConsistencyConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ConsistencyConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &ConsistencyConfig {
        &self.config
    }

    /// Check a newly recorded relation against all relations recorded so far
    ///
    /// `relations` may include `new_relation` itself. At most one finding is
    /// produced per pattern, however many earlier relations conflict.
    pub fn check(&self, new_relation: &Relation, relations: &[Relation]) -> Vec<Finding> {
        let mut findings = Vec::new();

        if self.config.detect_equivalent_operators {
            if let Some(finding) = self.check_equivalent_operators(new_relation, relations) {
                warn!(
                    "{} between '{}' and '{}'",
                    finding.kind.name(),
                    finding.activity_a,
                    finding.activity_b
                );
                findings.push(finding);
            }
        }

        debug!(
            "Checked {} {} against {} relations: {} finding(s)",
            new_relation.kind,
            new_relation.pair(),
            relations.len(),
            findings.len()
        );

        findings
    }

    /// DEP and XOR over the same unordered pair
    fn check_equivalent_operators(
        &self,
        new_relation: &Relation,
        relations: &[Relation],
    ) -> Option<Finding> {
        let counterpart = match new_relation.kind {
            RelationKind::StrictDependency => RelationKind::Exclusive,
            RelationKind::Exclusive => RelationKind::StrictDependency,
            RelationKind::NoDependency
            | RelationKind::ConditionalDependency
            | RelationKind::NonExclusive
            | RelationKind::InclusiveUnion
            | RelationKind::PartialUnion => return None,
        };

        relations
            .iter()
            .find(|r| r.kind == counterpart && r.same_unordered_pair(new_relation))
            .map(|existing| Finding {
                kind: FindingKind::EquivalentOperators,
                activity_a: new_relation.activity_a.clone(),
                activity_b: new_relation.activity_b.clone(),
                new_kind: new_relation.kind,
                conflicting_kind: existing.kind,
            })
    }
}
