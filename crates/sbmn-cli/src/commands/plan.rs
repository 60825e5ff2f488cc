//! Plan command implementation.

use crate::cli::PlanArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use sbmn_domain::{generate_pairs, QuestionCycle};
use sbmn_interview::{distinct_activities, parse_activity_list, InterviewError};

/// Execute the plan command.
pub fn execute_plan(args: PlanArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    println!("{}", plan(&args, config, formatter)?);
    Ok(())
}

/// Render the pair plan without consulting an expert.
pub fn plan(args: &PlanArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let separator = args
        .separator
        .as_deref()
        .unwrap_or(&config.interview.activity_separator);
    let cycle = args
        .variant
        .map(QuestionCycle::from)
        .unwrap_or(config.interview.cycle);

    let names = parse_activity_list(&args.activities, separator);
    let activities = distinct_activities(names.as_slice(), config.interview.duplicates)?;
    if activities.len() < 2 {
        return Err(InterviewError::InsufficientActivities {
            found: activities.len(),
        }
        .into());
    }

    formatter.format_plan(&generate_pairs(&activities), cycle)
}
