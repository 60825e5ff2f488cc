//! Interview command implementation.

use crate::cli::InterviewArgs;
use crate::config::Config;
use crate::error::Result;
use crate::expert::build_expert;
use crate::output::Formatter;
use crate::repl::{self, Editor, IntroFields};
use sbmn_domain::QuestionCycle;
use sbmn_gatekeeper::Gatekeeper;
use sbmn_interview::{InterviewConfig, Interviewer};
use tracing::info;

/// Execute the interview command.
pub fn execute_interview(args: InterviewArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let interview_config = interview_config(&args, config);
    interview_config
        .validate()
        .map_err(crate::CliError::InvalidInput)?;

    let profile = config.get_active_profile()?;
    info!("Starting interview with profile '{}'", config.active_profile);
    let expert = build_expert(profile)?;

    let interviewer = Interviewer::new(
        expert,
        Gatekeeper::new(config.consistency.clone()),
        interview_config,
    );

    let history = Config::home_dir().ok().map(|dir| dir.join("history.txt"));
    let mut editor = Editor::new(config.settings.history_size, history)?;

    let fields = IntroFields {
        process: args.process,
        domain: args.domain,
        activities: args.activities,
    };
    let result = repl::run_interview(&interviewer, &mut editor, fields, formatter);

    editor.save_history()?;
    result.map(|_| ())
}

/// Configured interview settings with command-line overrides applied.
///
/// A variant switches cycle, recording policy and XOR polarity together;
/// language, duplicate policy and separator keep their configured values.
pub fn interview_config(args: &InterviewArgs, config: &Config) -> InterviewConfig {
    let mut interview = config.interview.clone();

    if let Some(variant) = args.variant {
        let preset = InterviewConfig::for_cycle(QuestionCycle::from(variant));
        interview.cycle = preset.cycle;
        interview.recording = preset.recording;
        interview.xor_polarity = preset.xor_polarity;
    }
    if let Some(separator) = &args.separator {
        interview.activity_separator = separator.clone();
    }

    interview
}
