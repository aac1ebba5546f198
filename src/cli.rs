use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};
use colored::Colorize;

use crate::changelog::cli::{GenerateRequest, handle_generate_command};
use crate::commands;
use crate::common::CommonParams;
use crate::config::Config;
use crate::ui;

const LOG_FILE: &str = "git-chronicle-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Git-Chronicle: AI-assisted changelog generation",
    long_about = "Git-Chronicle turns a range of commits into categorized changelog entries and keeps CHANGELOG.md and per-change fragments current.",
    disable_version_flag = true,
    after_help = get_dynamic_help(),
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, notices, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
#[command(subcommand_negates_reqs = true)]
#[command(subcommand_precedence_over_arg = true)]
pub enum Commands {
    /// Generate categorized changelog entries for a commit range
    #[command(
        about = "Generate changelog entries for a commit range",
        long_about = "Score and rank the commits between two Git references, generate categorized changelog entries for them, and merge the result into the changelog document (and optionally a per-change fragment)."
    )]
    Generate {
        #[command(flatten)]
        common: CommonParams,

        /// Starting Git reference (commit hash, tag, or branch name)
        #[arg(long, required = true)]
        from: String,

        /// Ending Git reference. Defaults to HEAD if not specified.
        #[arg(long)]
        to: Option<String>,

        /// Pull request number associated with this change
        #[arg(long = "pr-number", help = "Pull request number associated with this change")]
        pr_number: Option<u64>,

        /// Pull request URL used in entry references
        #[arg(long = "pr-url", help = "Pull request URL used in entry references")]
        pr_url: Option<String>,

        /// Changelog section the entries are merged into
        #[arg(
            long = "target-section",
            default_value = "Unreleased",
            help = "Changelog section the entries are merged into"
        )]
        target_section: String,

        /// Path to a deprecations report produced by the scanner
        #[arg(
            long = "deprecations-file",
            help = "Path to a deprecations JSON report produced by the scanner"
        )]
        deprecations_file: Option<String>,

        /// Path to the changelog file
        #[arg(long, help = "Path to the changelog file (defaults to CHANGELOG.md)")]
        file: Option<String>,

        /// Also write a per-change fragment keyed by the PR number
        #[arg(
            long,
            help = "Also write a per-change fragment keyed by the PR number (requires --pr-number)"
        )]
        fragment: bool,

        /// Print the categorized entries without updating any file
        #[arg(long = "dry-run", help = "Print the categorized entries without updating any file")]
        dry_run: bool,
    },

    /// Create the changelog document skeleton if it does not exist
    #[command(
        about = "Create the changelog document skeleton",
        long_about = "Create CHANGELOG.md with the standard header and an empty Unreleased section. Does nothing when the file already exists."
    )]
    Init {
        /// Path to the changelog file
        #[arg(long, help = "Path to the changelog file (defaults to CHANGELOG.md)")]
        file: Option<String>,
    },

    /// Configure git-chronicle settings
    #[command(about = "Configure git-chronicle settings")]
    Config {
        #[command(flatten)]
        common: CommonParams,

        /// Set the API key for the generation provider
        #[arg(long, help = "Set the API key for the generation provider")]
        api_key: Option<String>,

        /// Write the settings to the project configuration file
        #[arg(
            long,
            help = "Write the settings to the project configuration file instead of the personal one"
        )]
        project: bool,

        /// Print the current configuration
        #[arg(short, long, help = "Print the current configuration")]
        print: bool,
    },
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Generate dynamic help including the default category taxonomy
fn get_dynamic_help() -> String {
    let categories = Config::default()
        .categories
        .iter()
        .map(|category| format!("{}", category.bold()))
        .collect::<Vec<_>>()
        .join(" \u{2022} ");

    format!("\nDefault categories: {categories}")
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if cli.log {
        crate::logger::enable_logging();
        crate::logger::set_log_to_stdout(!cli.quiet);
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;
    } else {
        crate::logger::disable_logging();
    }

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    if let Some(command) = cli.command {
        handle_command(command).await
    } else {
        // If no subcommand is provided, print the help
        let _ = Cli::parse_from(["git-chronicle", "--help"]);
        Ok(())
    }
}

/// Dispatch a parsed subcommand to its handler
async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            common,
            from,
            to,
            pr_number,
            pr_url,
            target_section,
            deprecations_file,
            file,
            fragment,
            dry_run,
        } => {
            handle_generate_command(GenerateRequest {
                common,
                from,
                to,
                pr_number,
                pr_url,
                target_section,
                deprecations_file,
                changelog_path: file.unwrap_or_else(|| "CHANGELOG.md".to_string()),
                write_fragment: fragment,
                dry_run,
            })
            .await
        }
        Commands::Init { file } => {
            commands::handle_init_command(&file.unwrap_or_else(|| "CHANGELOG.md".to_string()))
        }
        Commands::Config {
            common,
            api_key,
            project,
            print,
        } => commands::handle_config_command(&common, api_key, project, print),
    }
}
