use anyhow::Result;
use clap::Args;

use crate::config::Config;

#[derive(Args, Clone, Default, Debug)]
pub struct CommonParams {
    /// Override the generation model for this run
    #[arg(long, help = "Override the generation model for this run")]
    pub model: Option<String>,

    /// Override the maximum number of commits considered
    #[arg(
        long = "max-commits",
        help = "Override the maximum number of commits considered per run"
    )]
    pub max_commits: Option<usize>,

    /// Provider resource prefix used when ranking commits
    #[arg(
        long = "resource-prefix",
        help = "Provider resource prefix (e.g. 'rafay') used when ranking commits"
    )]
    pub resource_prefix: Option<String>,
}

impl CommonParams {
    /// Applies the overrides to `config`. Returns true when any value
    /// actually changed.
    pub fn apply_to_config(&self, config: &mut Config) -> Result<bool> {
        let mut changes_made = false;

        if let Some(model) = &self.model
            && config.ai_model != *model
        {
            config.ai_model.clone_from(model);
            changes_made = true;
        }

        if let Some(max_commits) = self.max_commits
            && config.max_commits_per_pr != max_commits
        {
            config.max_commits_per_pr = max_commits;
            changes_made = true;
        }

        if let Some(prefix) = &self.resource_prefix
            && config.resource_prefix.as_deref() != Some(prefix)
        {
            config.resource_prefix = Some(prefix.clone());
            changes_made = true;
        }

        Ok(changes_made)
    }
}
