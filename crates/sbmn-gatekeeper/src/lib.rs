//! SBMN Gatekeeper
//!
//! Scans the accumulated relation set for contradictions whenever a new
//! relation is recorded.
//!
//! The Gatekeeper provides:
//! - "Equivalent Operators" detection: a strict dependency (DEP) and a mutual
//!   exclusion (XOR) over the same two activities, in either order
//!
//! Findings are advisory. They never reject a relation or block the
//! interview; the analyst is expected to re-evaluate the pair.
//!
//! Dependency cycles, indirect dependency blocking, promiscuity and dual
//! dependency are not detected.
//!
//! # Examples
//!
//! ```
//! use sbmn_gatekeeper::{Gatekeeper, ConsistencyConfig};
//! use sbmn_domain::{OrderedPair, Relation, RelationKind, Validation};
//!
//! let gatekeeper = Gatekeeper::new(ConsistencyConfig::default());
//! let dep = Relation::new(&OrderedPair::new("A", "B"), RelationKind::StrictDependency, "Sim", Validation::yes(), "");
//! let xor = Relation::new(&OrderedPair::new("B", "A"), RelationKind::Exclusive, "Não", Validation::no(), "");
//!
//! let findings = gatekeeper.check(&xor, &[dep, xor.clone()]);
//! assert_eq!(findings.len(), 1);
//! ```

#![warn(missing_docs)]

mod checker;
mod config;

pub use checker::{Finding, FindingKind, Gatekeeper};
pub use config::ConsistencyConfig;
