//! Configuration for the interview

use sbmn_domain::{QuestionCycle, RecordingPolicy, XorPolarity};
use serde::{Deserialize, Serialize};

/// What to do with repeated activity names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the first occurrence and drop later ones
    #[default]
    Collapse,
    /// Refuse to start the interview
    Reject,
}

/// Language of the question templates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Portuguese
    #[default]
    Pt,
    /// English
    En,
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pt" | "pt-br" | "portuguese" => Ok(Language::Pt),
            "en" | "english" => Ok(Language::En),
            _ => Err(format!("Invalid language: {}", s)),
        }
    }
}

/// Configuration for the Interviewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewConfig {
    /// Question cycle walked for every pair
    pub cycle: QuestionCycle,

    /// Which classified relations are recorded
    pub recording: RecordingPolicy,

    /// Wording of the exclusion question, and therefore its answer mapping
    pub xor_polarity: XorPolarity,

    /// Handling of repeated activity names
    pub duplicates: DuplicatePolicy,

    /// Language of the question templates
    pub language: Language,

    /// Separator used to split a raw activity list
    pub activity_separator: String,
}

impl Default for InterviewConfig {
    /// Extended cycle, every relation recorded
    fn default() -> Self {
        Self::extended()
    }
}

impl InterviewConfig {
    /// Extended preset: DEP_INITIAL/DEP_COMPLEMENTARY/XOR/UNION, negative
    /// outcomes recorded too
    pub fn extended() -> Self {
        Self {
            cycle: QuestionCycle::Extended,
            recording: RecordingPolicy::Always,
            xor_polarity: XorPolarity::CanCoOccur,
            duplicates: DuplicatePolicy::Collapse,
            language: Language::Pt,
            activity_separator: ",".to_string(),
        }
    }

    /// Simplified preset: DEPENDENCY/XOR, only affirmative validations recorded
    pub fn simplified() -> Self {
        Self {
            cycle: QuestionCycle::Simplified,
            recording: RecordingPolicy::AffirmativeOnly,
            xor_polarity: XorPolarity::CannotCoOccur,
            ..Self::extended()
        }
    }

    /// Preset for a cycle
    pub fn for_cycle(cycle: QuestionCycle) -> Self {
        match cycle {
            QuestionCycle::Extended => Self::extended(),
            QuestionCycle::Simplified => Self::simplified(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.activity_separator.trim().is_empty() {
            return Err("activity_separator must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
