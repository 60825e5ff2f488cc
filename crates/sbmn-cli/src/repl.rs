//! Interactive interview loop.
//!
//! Reads analyst input line by line: first the introduction fields, then one
//! validation (and optional note) per step, and finally one free-text
//! closing note. Lines starting with `:` are commands and are accepted at
//! any validation prompt.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sbmn_domain::traits::DomainExpert;
use sbmn_domain::{Answer, ResponseFormat, UnionOption, Validation};
use sbmn_interview::{InterviewError, Interviewer, Session, SessionSummary};
use std::path::PathBuf;
use tracing::debug;

/// Source of analyst input lines.
pub trait LineSource {
    /// Read one line. `None` means the analyst ended input (Ctrl-C or Ctrl-D).
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Line editor with persistent history.
pub struct Editor {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl Editor {
    /// Create an editor, loading history from `history_path` when given.
    pub fn new(history_size: usize, history_path: Option<PathBuf>) -> Result<Self> {
        let config = rustyline::Config::builder()
            .max_history_size(history_size)?
            .auto_add_history(true)
            .build();
        let mut editor = DefaultEditor::with_config(config)?;

        if let Some(path) = &history_path {
            // Missing history on first run
            let _ = editor.load_history(path);
        }

        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Write history back to disk.
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(path) = &self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(path)?;
        }
        Ok(())
    }
}

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Introduction fields; missing ones are asked for interactively.
#[derive(Debug, Clone, Default)]
pub struct IntroFields {
    /// Process name
    pub process: Option<String>,
    /// Process domain
    pub domain: Option<String>,
    /// Raw activity list
    pub activities: Option<String>,
}

/// In-interview command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    /// Print the summary so far
    Summary,
    /// Discard the session and start over
    Reset,
    /// Print the command help
    Help,
    /// End the interview
    Quit,
}

/// One parsed line of analyst input at a validation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalystInput {
    /// An in-interview command
    Command(ReplCommand),
    /// Answer to a binary question
    Binary(Answer),
    /// Options selected for a union question (possibly none)
    Union(Vec<UnionOption>),
}

/// Parse a validation line for a question with the given response format.
pub fn parse_analyst_input(line: &str, format: ResponseFormat) -> Result<AnalystInput> {
    let line = line.trim();

    if let Some(command) = line.strip_prefix(':') {
        let command = match command.trim().to_lowercase().as_str() {
            "summary" | "s" => ReplCommand::Summary,
            "reset" | "r" => ReplCommand::Reset,
            "help" | "h" | "?" => ReplCommand::Help,
            "quit" | "q" | "exit" => ReplCommand::Quit,
            other => {
                return Err(CliError::InvalidInput(format!(
                    "Unknown command ':{}'. Type :help for commands.",
                    other
                )))
            }
        };
        return Ok(AnalystInput::Command(command));
    }

    match format {
        ResponseFormat::Binary => Answer::parse(line)
            .map(AnalystInput::Binary)
            .ok_or_else(|| CliError::InvalidInput(format!("Expected s/n, got '{}'", line))),
        ResponseFormat::OpenEnumeration => {
            let mut options = Vec::new();
            for token in line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
            {
                let option = match token.to_lowercase().as_str() {
                    "a" => UnionOption::OnlyA,
                    "b" => UnionOption::OnlyB,
                    "ambos" | "both" => UnionOption::Both,
                    other => {
                        return Err(CliError::InvalidInput(format!(
                            "Unknown option '{}'. Use a, b, ambos.",
                            other
                        )))
                    }
                };
                if !options.contains(&option) {
                    options.push(option);
                }
            }
            Ok(AnalystInput::Union(options))
        }
    }
}

/// Run an interview to completion.
///
/// Returns the final summary, or `None` if input ended before the
/// interview started.
pub fn run_interview<E: DomainExpert, L: LineSource>(
    interviewer: &Interviewer<E>,
    input: &mut L,
    mut fields: IntroFields,
    formatter: &Formatter,
) -> Result<Option<SessionSummary>> {
    println!(
        "{}",
        formatter.info("SBMN interview - Type :help for commands")
    );

    'session: loop {
        let Some(mut session) = introduce(interviewer, input, &mut fields, formatter)? else {
            return Ok(None);
        };

        loop {
            let Some(prompt) = session.current_prompt().cloned() else {
                println!();
                println!("{}", formatter.success("Interview complete"));
                println!("{}", formatter.info(interviewer.templates().closing()));
                let note = input.read_line("> ")?.unwrap_or_default();
                interviewer.close(&mut session, &note)?;
                print_summary(&session, formatter)?;
                return Ok(Some(session.summary()));
            };

            println!();
            println!("{}", formatter.prompt(&prompt));

            let Some(line) = input.read_line("> ")? else {
                print_summary(&session, formatter)?;
                return Ok(Some(session.summary()));
            };

            let parsed = match parse_analyst_input(&line, prompt.format) {
                Ok(parsed) => parsed,
                Err(e) => {
                    eprintln!("{}", formatter.error(&e.to_string()));
                    continue;
                }
            };

            match parsed {
                AnalystInput::Command(ReplCommand::Summary) => print_summary(&session, formatter)?,
                AnalystInput::Command(ReplCommand::Help) => print_help(formatter),
                AnalystInput::Command(ReplCommand::Quit) => {
                    print_summary(&session, formatter)?;
                    return Ok(Some(session.summary()));
                }
                AnalystInput::Command(ReplCommand::Reset) => {
                    debug!("Resetting session {}", session.id());
                    session.reset();
                    fields = IntroFields::default();
                    println!("{}", formatter.info("Session reset"));
                    continue 'session;
                }
                AnalystInput::Binary(answer) => {
                    let note = read_note(input)?;
                    let result = interviewer.submit_validation(&mut session, Validation::Binary(answer), &note);
                    report_step(result, formatter);
                }
                AnalystInput::Union(options) => {
                    for option in options {
                        session.stage_union_option(option, true);
                    }
                    let note = read_note(input)?;
                    let result = interviewer.submit_staged_union(&mut session, &note);
                    report_step(result, formatter);
                }
            }
        }
    }
}

/// Ask for missing introduction fields until the interview starts.
fn introduce<E: DomainExpert, L: LineSource>(
    interviewer: &Interviewer<E>,
    input: &mut L,
    fields: &mut IntroFields,
    formatter: &Formatter,
) -> Result<Option<Session>> {
    let separator = interviewer.config().activity_separator.clone();

    loop {
        let Some(process) = ask_field(input, &mut fields.process, "Nome do processo: ")? else {
            return Ok(None);
        };
        let Some(domain) = ask_field(input, &mut fields.domain, "Domínio: ")? else {
            return Ok(None);
        };
        let activities_prompt = format!("Atividades (separadas por '{}'): ", separator);
        let Some(raw) = ask_field(input, &mut fields.activities, &activities_prompt)? else {
            return Ok(None);
        };

        let names = sbmn_interview::parse_activity_list(&raw, &separator);
        match interviewer.start(&process, &domain, names.as_slice()) {
            Ok(session) => {
                println!(
                    "{}",
                    formatter.success(&format!(
                        "{} activities, {} pairs to analyze",
                        session.activities().len(),
                        session.pending_pairs().len()
                    ))
                );
                return Ok(Some(session));
            }
            Err(e @ InterviewError::MissingField(field)) => {
                eprintln!("{}", formatter.error(&e.to_string()));
                match field {
                    "process_name" => fields.process = None,
                    _ => fields.domain = None,
                }
            }
            Err(
                e @ (InterviewError::InsufficientActivities { .. }
                | InterviewError::DuplicateActivity(_)),
            ) => {
                eprintln!("{}", formatter.error(&e.to_string()));
                fields.activities = None;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Return the field's value, asking until a non-blank line is entered.
fn ask_field<L: LineSource>(
    input: &mut L,
    field: &mut Option<String>,
    prompt: &str,
) -> Result<Option<String>> {
    while field.as_deref().map_or(true, |v| v.trim().is_empty()) {
        match input.read_line(prompt)? {
            Some(line) => *field = Some(line.trim().to_string()),
            None => return Ok(None),
        }
    }
    Ok(field.clone())
}

fn read_note<L: LineSource>(input: &mut L) -> Result<String> {
    Ok(input.read_line("Nota (opcional): ")?.unwrap_or_default())
}

fn report_step(
    result: std::result::Result<sbmn_interview::StepOutcome, InterviewError>,
    formatter: &Formatter,
) {
    match result {
        Ok(outcome) => {
            if let Some(relation) = &outcome.recorded {
                println!(
                    "{}",
                    formatter.success(&format!(
                        "{} {} {}",
                        relation.activity_a, relation.kind, relation.activity_b
                    ))
                );
            }
            for finding in &outcome.findings {
                println!("{}", formatter.finding(finding));
            }
        }
        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
    }
}

fn print_summary(session: &Session, formatter: &Formatter) -> Result<()> {
    println!();
    println!("{}", formatter.format_summary(&session.summary())?);
    Ok(())
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Validation:"));
    println!("  s, sim / n, não           - Answer a yes/no question");
    println!("  a, b, ambos               - Union options (comma or space separated, empty for none)");
    println!();
    println!("{}", formatter.info("Commands:"));
    println!("  :summary                  - Show the relations recorded so far");
    println!("  :reset                    - Discard the session and start over");
    println!("  :help                     - Show this help");
    println!("  :quit                     - End the interview and show the summary");
    println!();
}
