//! SBMN CLI - Interview-driven elicitation of behavioral constraints between process activities.

use clap::Parser;
use sbmn_cli::commands;
use sbmn_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so table and JSON output stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> sbmn_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None => commands::execute_interview(Default::default(), &config, &formatter)?,
        Some(Command::Interview(args)) => commands::execute_interview(args, &config, &formatter)?,
        Some(Command::Plan(args)) => commands::execute_plan(args, &config, &formatter)?,
        Some(Command::Profile(args)) => commands::execute_profile(args, &mut config, &formatter)?,
    }

    Ok(())
}
