//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs, ProviderArg};
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            provider,
            endpoint,
            model,
            api_key_env,
        } => set_profile(
            config,
            name,
            provider,
            endpoint,
            model,
            api_key_env,
            formatter,
        ),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile(profile, "  ");

    Ok(())
}

fn print_profile(profile: &Profile, indent: &str) {
    println!("{}Provider: {}", indent, profile.provider);
    if let Some(endpoint) = &profile.endpoint {
        println!("{}Endpoint: {}", indent, endpoint);
    }
    if let Some(model) = &profile.model {
        println!("{}Model: {}", indent, model);
    }
    if let Some(var) = &profile.api_key_env {
        println!("{}API key from: ${}", indent, var);
    }
    if let Some(retries) = profile.max_retries {
        println!("{}Max retries: {}", indent, retries);
    }
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    provider: ProviderArg,
    endpoint: Option<String>,
    model: Option<String>,
    api_key_env: Option<String>,
    formatter: &Formatter,
) -> Result<()> {
    let max_retries = config.profiles.get(&name).and_then(|p| p.max_retries);
    let profile = Profile {
        provider: provider.into(),
        endpoint,
        model,
        api_key_env,
        max_retries,
    };

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if config.delete_profile(&name)? {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputFormat, ProviderKind};
    use tempfile::TempDir;

    fn temp_config(dir: &TempDir) -> Config {
        Config::load_from(&dir.path().join("config.toml")).unwrap()
    }

    #[test]
    fn test_set_and_switch_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        set_profile(
            &mut config,
            "local".to_string(),
            ProviderArg::Ollama,
            Some("http://localhost:11434".to_string()),
            Some("llama3.2".to_string()),
            None,
            &formatter,
        )
        .unwrap();

        assert_eq!(config.profiles["local"].provider, ProviderKind::Ollama);

        switch_profile(&mut config, "local".to_string(), &formatter).unwrap();
        assert_eq!(config.active_profile, "local");

        let reloaded = temp_config(&dir);
        assert_eq!(reloaded.active_profile, "local");
        assert_eq!(reloaded.profiles["local"].model.as_deref(), Some("llama3.2"));
    }

    #[test]
    fn test_delete_active_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = delete_profile(&mut config, "default".to_string(), &formatter);
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_missing_profile_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        delete_profile(&mut config, "offline".to_string(), &formatter).unwrap();
        assert!(!config.profiles.contains_key("offline"));
        delete_profile(&mut config, "offline".to_string(), &formatter).unwrap();
    }
}
