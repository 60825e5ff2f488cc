//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SBMN Analyst - Elicit behavioral constraints between process activities.
#[derive(Debug, Parser)]
#[command(name = "sbmn")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SBMN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Expert profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one relation per line)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run an interactive interview
    Interview(InterviewArgs),

    /// Print the pair plan for an activity list without asking the expert
    Plan(PlanArgs),

    /// Manage expert profiles
    Profile(ProfileArgs),
}

/// Arguments for the interview command.
#[derive(Debug, Default, Parser)]
pub struct InterviewArgs {
    /// Full, descriptive process name
    #[arg(long)]
    pub process: Option<String>,

    /// Sector or application domain of the process
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Activities, separated by the activity separator
    #[arg(short, long)]
    pub activities: Option<String>,

    /// Activity separator (default from configuration)
    #[arg(short, long)]
    pub separator: Option<String>,

    /// Question cycle
    #[arg(short, long, value_enum)]
    pub variant: Option<VariantArg>,
}

/// Arguments for the plan command.
#[derive(Debug, Parser)]
pub struct PlanArgs {
    /// Activities, separated by the activity separator
    #[arg(short, long)]
    pub activities: String,

    /// Activity separator (default from configuration)
    #[arg(short, long)]
    pub separator: Option<String>,

    /// Question cycle
    #[arg(short, long, value_enum)]
    pub variant: Option<VariantArg>,
}

/// Question cycle argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum VariantArg {
    /// DEP_INITIAL, DEP_COMPLEMENTARY, XOR, UNION; every outcome recorded
    Extended,
    /// DEPENDENCY, XOR; only affirmative validations recorded
    Simplified,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Expert provider
        #[arg(long, value_enum)]
        provider: ProviderArg,
        /// Provider endpoint or base URL
        #[arg(short, long)]
        endpoint: Option<String>,
        /// Model name
        #[arg(short, long)]
        model: Option<String>,
        /// Environment variable holding the API key
        #[arg(long)]
        api_key_env: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Expert provider argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderArg {
    /// Deterministic offline expert
    Mock,
    /// Local Ollama server
    Ollama,
    /// Google Gemini API
    Gemini,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<VariantArg> for sbmn_domain::QuestionCycle {
    fn from(variant: VariantArg) -> Self {
        match variant {
            VariantArg::Extended => sbmn_domain::QuestionCycle::Extended,
            VariantArg::Simplified => sbmn_domain::QuestionCycle::Simplified,
        }
    }
}

impl From<ProviderArg> for crate::config::ProviderKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Mock => crate::config::ProviderKind::Mock,
            ProviderArg::Ollama => crate::config::ProviderKind::Ollama,
            ProviderArg::Gemini => crate::config::ProviderKind::Gemini,
        }
    }
}
