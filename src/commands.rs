use anyhow::Result;
use colored::Colorize;

use crate::changelog::ChangelogDocument;
use crate::common::CommonParams;
use crate::config::Config;
use crate::log_debug;
use crate::ui;

/// Handle the 'config' command
pub fn handle_config_command(
    common: &CommonParams,
    api_key: Option<String>,
    project: bool,
    print: bool,
) -> Result<()> {
    log_debug!(
        "Starting 'config' command with common: {:?}, project: {}, print: {}",
        common,
        project,
        print
    );

    let mut config = Config::load()?;
    let mut changes_made = common.apply_to_config(&mut config)?;

    if let Some(key) = api_key {
        if project {
            ui::print_warning("API keys are never written to the project configuration file.");
        } else if config.api_key != key {
            config.api_key = key;
            changes_made = true;
        }
    }

    if changes_made {
        if project {
            config.save_as_project_config()?;
            ui::print_success("Project configuration updated.");
        } else {
            config.save()?;
            ui::print_success("Configuration updated.");
        }
    }

    if print || !changes_made {
        print_configuration(&config);
    }

    Ok(())
}

/// Print the current configuration values
fn print_configuration(config: &Config) {
    println!("{}", "Current configuration:".magenta().bold());
    println!("  Model: {}", config.ai_model.green());
    println!("  Changelog style: {}", config.changelog_style.green());
    println!(
        "  Max commits per run: {}",
        config.max_commits_per_pr.to_string().green()
    );
    println!(
        "  Resource prefix: {}",
        config.resource_prefix.as_deref().unwrap_or("(none)").green()
    );
    println!("  Fragment directory: {}", config.fragment_dir.green());
    println!(
        "  API key: {}",
        if config.api_key.is_empty() {
            "(not set)".yellow()
        } else {
            "(set)".green()
        }
    );
    println!("  Categories:");
    for category in &config.categories {
        println!("    {}", category.cyan());
    }
}

/// Handle the 'init' command
pub fn handle_init_command(changelog_path: &str) -> Result<()> {
    let config = Config::load()?;
    let document = ChangelogDocument::new(changelog_path, &config.categories);

    if document.ensure_initialized()? {
        ui::print_success(&format!("Created {changelog_path}"));
    } else {
        ui::print_info(&format!("{changelog_path} already exists; leaving it untouched."));
    }
    Ok(())
}
