//! Activity module - the atomic activities and events (AFOs) of a process

use serde::{Deserialize, Serialize};
use std::fmt;

/// An activity or event of the process under analysis (an "AFO")
///
/// Activities are identified by their label. They are created once from the
/// initial activity list and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Activity(String);

impl Activity {
    /// Create a new activity from its label
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The activity label
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Activity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Activity {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Name and sector of the process being interviewed
///
/// Passed to the domain expert so it can answer in context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessContext {
    /// Full, descriptive process name
    pub process_name: String,

    /// Sector or application domain of the process
    pub domain: String,
}

impl ProcessContext {
    /// Create a new process context
    pub fn new(process_name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            process_name: process_name.into(),
            domain: domain.into(),
        }
    }
}
