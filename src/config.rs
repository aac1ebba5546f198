//! Configuration for git-chronicle

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::git::GitRepo;
use crate::{log_debug, log_warn};

/// Project configuration filename, looked up at the repository root
pub const PROJECT_CONFIG_FILENAME: &str = ".chronicleconfig";

/// Configuration structure for the git-chronicle application
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Ordered changelog taxonomy. The order is significant: it drives
    /// both classification priority and rendered section order.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    /// Maximum number of commits considered per change request
    #[serde(default = "default_max_commits")]
    pub max_commits_per_pr: usize,
    /// Model identifier passed through to the generation provider
    #[serde(default = "default_ai_model")]
    pub ai_model: String,
    /// Changelog style hint passed through to the generation prompt
    #[serde(default = "default_changelog_style")]
    pub changelog_style: String,
    /// API key for the generation provider; never read from the project
    /// configuration file
    #[serde(default)]
    pub api_key: String,
    /// Provider identifier prefix (e.g. "rafay") used by the commit
    /// scorer's resource boost
    #[serde(default)]
    pub resource_prefix: Option<String>,
    /// Directory fragments are written into
    #[serde(default = "default_fragment_dir")]
    pub fragment_dir: String,
    /// Flag indicating if this config is from a project file
    #[serde(skip)]
    pub is_project_config: bool,
}

fn default_categories() -> Vec<String> {
    [
        "BREAKING CHANGES",
        "FEATURES",
        "ENHANCEMENTS",
        "BUG FIXES",
        "DEPRECATIONS",
        "DOCUMENTATION",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_max_commits() -> usize {
    100
}

fn default_ai_model() -> String {
    "claude-sonnet-4-5-20250929".to_string()
}

fn default_changelog_style() -> String {
    "terraform-provider".to_string()
}

fn default_fragment_dir() -> String {
    ".changelog".to_string()
}

impl Config {
    /// Load the configuration from the personal file, then merge the
    /// project file on top when one exists.
    ///
    /// A missing or malformed file is never fatal: the built-in defaults
    /// are used instead and a warning is logged.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let mut config = if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(content) => Self::from_toml(&content),
                Err(e) => {
                    log_warn!(
                        "Unreadable configuration at {}, using defaults: {e}",
                        config_path.display()
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        if let Ok(project_config) = Self::load_project_config() {
            config.merge_with_project_config(project_config);
        }

        log_debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Parse a TOML configuration document, degrading to the built-in
    /// defaults when the content is malformed.
    pub fn from_toml(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => config,
            Err(e) => {
                log_warn!("Malformed configuration, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Load project-specific configuration from the repository root.
    pub fn load_project_config() -> Result<Self> {
        let config_path = Self::get_project_config_path()?;
        if !config_path.exists() {
            return Err(anyhow!("Project configuration file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let mut config = Self::from_toml(&content);
        config.is_project_config = true;
        Ok(config)
    }

    /// Get the path to the project configuration file.
    pub fn get_project_config_path() -> Result<PathBuf> {
        let repo_root = GitRepo::get_repo_root()?;
        Ok(repo_root.join(PROJECT_CONFIG_FILENAME))
    }

    /// Merge this config with a project config, with the project config
    /// taking precedence. API keys are never taken from project files.
    pub fn merge_with_project_config(&mut self, project_config: Self) {
        log_debug!("Merging with project configuration");

        if project_config.categories != default_categories() {
            self.categories = project_config.categories;
        }
        if project_config.max_commits_per_pr != default_max_commits() {
            self.max_commits_per_pr = project_config.max_commits_per_pr;
        }
        if project_config.ai_model != default_ai_model() {
            self.ai_model = project_config.ai_model;
        }
        if project_config.changelog_style != default_changelog_style() {
            self.changelog_style = project_config.changelog_style;
        }
        if project_config.resource_prefix.is_some() {
            self.resource_prefix = project_config.resource_prefix;
        }
        if project_config.fragment_dir != default_fragment_dir() {
            self.fragment_dir = project_config.fragment_dir;
        }
    }

    /// Save the configuration to the personal file.
    pub fn save(&self) -> Result<()> {
        // Project configs never overwrite the personal file
        if self.is_project_config {
            return Ok(());
        }

        let config_path = Self::get_config_path()?;
        let content = toml::to_string(self)?;
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        log_debug!("Configuration saved to {}", config_path.display());
        Ok(())
    }

    /// Save the configuration as the project file, with the API key
    /// stripped.
    pub fn save_as_project_config(&self) -> Result<()> {
        let config_path = Self::get_project_config_path()?;

        let mut project_config = self.clone();
        project_config.api_key.clear();
        project_config.is_project_config = true;

        let content = toml::to_string_pretty(&project_config)?;
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(())
    }

    /// Get the path to the personal configuration file.
    fn get_config_path() -> Result<PathBuf> {
        let mut path = config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("git-chronicle");
        fs::create_dir_all(&path)?;
        path.push("config.toml");
        Ok(path)
    }

    /// Check the environment for necessary prerequisites.
    pub fn check_environment(&self) -> Result<()> {
        if !GitRepo::is_inside_work_tree()? {
            return Err(anyhow!(
                "Not in a Git repository. Please run this command from within a Git repository."
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            max_commits_per_pr: default_max_commits(),
            ai_model: default_ai_model(),
            changelog_style: default_changelog_style(),
            api_key: String::new(),
            resource_prefix: None,
            fragment_dir: default_fragment_dir(),
            is_project_config: false,
        }
    }
}
