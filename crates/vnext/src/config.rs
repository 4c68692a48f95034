//! Runtime configuration for the synchronizer.
//!
//! Everything the synchronizer needs is passed in explicitly at
//! construction; nothing is read from the process environment after the CLI
//! layer has assembled this struct.

use crate::checks::CheckType;
use std::path::PathBuf;

/// Repository whose issues track vnext failures.
pub const DEFAULT_REPOSITORY: &str = "Azure/azure-sdk-for-python";

/// Automation identity that files tracking issues.
pub const DEFAULT_BOT_LOGIN: &str = "azure-sdk";

/// Explicit configuration for one synchronizer run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository whose issues are managed, as "owner/repo".
    pub repository: String,
    /// Login of the automation identity that creates tracking issues.
    pub bot_login: String,
    /// Ownership manifest used for label resolution.
    pub codeowners_path: PathBuf,
    /// CI build id, when running inside a pipeline.
    pub build_id: Option<String>,
    /// CI job id, when running inside a pipeline.
    pub job_id: Option<String>,
}

impl Config {
    /// Build-results URL for the pane running `check` in the current build.
    #[must_use]
    pub fn build_link(&self, check: CheckType) -> String {
        format!(
            "https://dev.azure.com/azure-sdk/internal/_build/results?buildId={}&view=logs&j={}&t={}",
            self.build_id.as_deref().unwrap_or_default(),
            self.job_id.as_deref().unwrap_or_default(),
            check.job_pane_id(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_link_carries_ids_and_pane() {
        let config = Config {
            repository: DEFAULT_REPOSITORY.to_string(),
            bot_login: DEFAULT_BOT_LOGIN.to_string(),
            codeowners_path: PathBuf::from(".github/CODEOWNERS"),
            build_id: Some("4221".to_string()),
            job_id: Some("job-9".to_string()),
        };

        let link = config.build_link(CheckType::Pyright);
        assert!(link.contains("buildId=4221"));
        assert!(link.contains("j=job-9"));
        assert!(link.contains(CheckType::Pyright.job_pane_id()));
    }
}
