//! Activity-list input

use crate::{DuplicatePolicy, InterviewError};
use sbmn_domain::Activity;
use std::collections::HashSet;
use tracing::warn;

/// Split a raw activity list into names
///
/// Names are trimmed and empty entries discarded. Repeated names are kept;
/// whether they are collapsed or rejected is decided when the interview
/// starts.
pub fn parse_activity_list(raw: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        let name = raw.trim();
        return if name.is_empty() {
            Vec::new()
        } else {
            vec![name.to_string()]
        };
    }

    raw.split(separator)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim names, drop empties, and apply the duplicate policy
///
/// Order is preserved; under [`DuplicatePolicy::Collapse`] the first
/// occurrence of a name wins.
pub fn distinct_activities<S: AsRef<str>>(
    names: &[S],
    policy: DuplicatePolicy,
) -> Result<Vec<Activity>, InterviewError> {
    let mut seen = HashSet::new();
    let mut activities = Vec::new();

    for name in names.iter().map(|n| n.as_ref().trim()).filter(|n| !n.is_empty()) {
        if seen.insert(name) {
            activities.push(Activity::new(name));
            continue;
        }

        match policy {
            DuplicatePolicy::Collapse => warn!("Ignoring duplicate activity '{}'", name),
            DuplicatePolicy::Reject => {
                return Err(InterviewError::DuplicateActivity(name.to_string()))
            }
        }
    }

    Ok(activities)
}
