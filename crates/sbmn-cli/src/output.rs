//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use sbmn_domain::{OrderedPair, QuestionCycle, ResponseFormat};
use sbmn_gatekeeper::Finding;
use sbmn_interview::{Prompt, SessionSummary};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the session summary.
    pub fn format_summary(&self, summary: &SessionSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Table => Ok(self.format_summary_table(summary)),
            OutputFormat::Quiet => Ok(format_summary_quiet(summary)),
        }
    }

    /// Format the summary as a table.
    fn format_summary_table(&self, summary: &SessionSummary) -> String {
        let mut out = format!(
            "Processo: {}\nDomínio: {}\nAtividades: {}\n\n",
            summary.process_name,
            summary.domain,
            summary
                .activities
                .iter()
                .map(|a| a.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        if summary.relations.is_empty() {
            out.push_str(&self.colorize("No relations recorded.", "yellow"));
        } else {
            out.push_str(&self.relations_table(summary));
        }

        if !summary.closing_note.is_empty() {
            out.push_str(&format!("\n\nObservações finais: {}", summary.closing_note));
        }

        out
    }

    /// Relations and findings of a non-empty summary.
    fn relations_table(&self, summary: &SessionSummary) -> String {
        let mut builder = Builder::default();
        builder.push_record(["A", "Kind", "B", "Expert", "Validation", "Note"]);

        for entry in &summary.relations {
            builder.push_record([
                entry.activity_a.as_str(),
                entry.kind.code(),
                entry.activity_b.as_str(),
                entry.expert_answer.as_str(),
                entry.validation.as_str(),
                entry.note.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        let mut out = table.to_string();

        if !summary.findings.is_empty() {
            out.push_str("\n\n");
            let findings: Vec<String> = summary.findings.iter().map(|f| self.finding(f)).collect();
            out.push_str(&findings.join("\n"));
        }

        out
    }

    /// Format the pair plan for an activity list.
    pub fn format_plan(&self, pairs: &[OrderedPair], cycle: QuestionCycle) -> Result<String> {
        let min_questions = pairs.len() * cycle.min_steps_per_pair();
        let max_questions = pairs.len() * cycle.max_steps_per_pair();

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "cycle": cycle,
                    "pairs": pairs,
                    "min_questions": min_questions,
                    "max_questions": max_questions,
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(pairs
                .iter()
                .map(|p| format!("{}\t{}", p.a, p.b))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["#", "A", "B"]);
                for (i, pair) in pairs.iter().enumerate() {
                    builder.push_record([(i + 1).to_string(), pair.a.to_string(), pair.b.to_string()]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let questions = if min_questions == max_questions {
                    format!("{} questions", min_questions)
                } else {
                    format!("{} to {} questions", min_questions, max_questions)
                };
                Ok(format!(
                    "{}\n{}",
                    table,
                    self.info(&format!("{} pairs, {}", pairs.len(), questions))
                ))
            }
        }
    }

    /// Format a question with the expert's answer.
    pub fn prompt(&self, prompt: &Prompt) -> String {
        let header = format!(
            "[{}/{}] {} ({})",
            prompt.pair_index + 1,
            prompt.total_pairs,
            prompt.pair,
            prompt.question_type
        );
        let hint = match prompt.format {
            ResponseFormat::Binary => "s/n",
            ResponseFormat::OpenEnumeration => "a, b, ambos (vazio = nenhuma)",
        };

        format!(
            "{}\n{}\n{} {}\n{}",
            self.colorize(&header, "cyan"),
            prompt.question,
            self.colorize("Especialista:", "magenta"),
            prompt.expert_answer,
            self.colorize(&format!("Sua validação ({})", hint), "blue"),
        )
    }

    /// Format an inconsistency finding.
    pub fn finding(&self, finding: &Finding) -> String {
        self.warning(&finding.message())
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

/// One `A KIND B` line per relation.
fn format_summary_quiet(summary: &SessionSummary) -> String {
    summary
        .relations
        .iter()
        .map(|e| format!("{} {} {}", e.activity_a, e.kind.code(), e.activity_b))
        .collect::<Vec<_>>()
        .join("\n")
}
