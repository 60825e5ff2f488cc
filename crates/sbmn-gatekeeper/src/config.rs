//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for consistency checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsistencyConfig {
    /// Flag a strict dependency and a mutual exclusion over the same two
    /// activities ("Equivalent Operators")
    pub detect_equivalent_operators: bool,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            detect_equivalent_operators: true,
        }
    }
}

impl ConsistencyConfig {
    /// Create a permissive configuration (no checks)
    pub fn permissive() -> Self {
        Self {
            detect_equivalent_operators: false,
        }
    }
}
