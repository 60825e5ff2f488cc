//! Ordered activity pairs
//!
//! Every ordered pair (A, B) with A ≠ B is questioned independently:
//! "B depends on A" and "A depends on B" are different questions.

use crate::Activity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered pair of distinct activities
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderedPair {
    /// First activity of the pair (the "A" in question templates)
    pub a: Activity,

    /// Second activity of the pair (the "B" in question templates)
    pub b: Activity,
}

impl OrderedPair {
    /// Create a new ordered pair
    pub fn new(a: impl Into<Activity>, b: impl Into<Activity>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// The same two activities in the opposite order
    pub fn reversed(&self) -> Self {
        Self {
            a: self.b.clone(),
            b: self.a.clone(),
        }
    }

    /// Whether both pairs cover the same two activities, in either order
    pub fn same_unordered(&self, other: &OrderedPair) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl fmt::Display for OrderedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

/// Generate all ordered pairs of size 2 over the activity list
///
/// Order follows the list: for each activity `i`, every other activity `j`
/// in list order, so `[A, B, C]` yields `(A,B) (A,C) (B,A) (B,C) (C,A) (C,B)`.
/// Pairs whose two labels coincide are skipped; callers de-duplicate first.
///
/// # Examples
///
/// ```
/// use sbmn_domain::{generate_pairs, Activity};
///
/// let activities = vec![Activity::new("A"), Activity::new("B")];
/// let pairs = generate_pairs(&activities);
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[1].a.name(), "B");
/// ```
pub fn generate_pairs(activities: &[Activity]) -> Vec<OrderedPair> {
    let mut pairs = Vec::with_capacity(activities.len() * activities.len().saturating_sub(1));

    for (i, a) in activities.iter().enumerate() {
        for (j, b) in activities.iter().enumerate() {
            if i == j || a == b {
                continue;
            }
            pairs.push(OrderedPair {
                a: a.clone(),
                b: b.clone(),
            });
        }
    }

    pairs
}
