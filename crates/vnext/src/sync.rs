//! Tracking-issue synchronization for failing and passing vnext runs.
//!
//! Each invocation performs at most one create, edit, or close against the
//! tracker. The open-issue set is queried fresh every time and matched by
//! title, so reruns converge instead of stacking duplicates.

use crate::checks::CheckType;
use crate::config::Config;
use crate::owners;
use crate::schedule;
use crate::tracker::{IssueTracker, NewIssue};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

/// Identity of a client library, derived from its directory path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    /// Leaf directory name, e.g. `azure-storage-blob`.
    pub name: String,
    /// Parent directory name, e.g. `storage`.
    pub service_directory: String,
}

impl PackageIdentity {
    /// Derive the identity from a package directory path. The leaf directory
    /// names the package; its parent names the owning service directory.
    pub fn from_path(package_dir: &Path) -> Result<Self> {
        let name = package_dir
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| {
                format!("Package path has no directory name: {}", package_dir.display())
            })?
            .to_string();

        let service_directory = package_dir
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .with_context(|| {
                format!(
                    "Package path has no parent service directory: {}",
                    package_dir.display()
                )
            })?
            .to_string();

        Ok(Self {
            name,
            service_directory,
        })
    }
}

/// Details of the check run that triggered this invocation.
#[derive(Debug, Clone)]
pub struct RunInfo {
    /// Version of the checker that produced the result.
    pub tool_version: String,
    /// Link to the CI build pane for this check.
    pub build_url: String,
    /// Date of the run.
    pub today: NaiveDate,
}

/// Synchronizes tracking issues with the latest vnext check results.
pub struct IssueSynchronizer<T> {
    tracker: T,
    config: Config,
}

impl<T: IssueTracker> IssueSynchronizer<T> {
    /// Create a synchronizer over `tracker` with explicit configuration.
    pub fn new(tracker: T, config: Config) -> Self {
        Self { tracker, config }
    }

    /// Record a failing run: file a tracking issue for the package, or
    /// refresh the existing one with the latest version, date, and build
    /// link.
    pub async fn create_vnext_issue(
        &self,
        package: &PackageIdentity,
        check: CheckType,
        run: &RunInfo,
    ) -> Result<()> {
        let issues = self
            .tracker
            .list_open_issues(check.name(), &self.config.bot_login)
            .await
            .context("Failed to list open tracking issues")?;
        let existing = issues
            .into_iter()
            .find(|issue| title_package(&issue.title) == package.name);

        let merge_date = schedule::next_merge_date(run.today);
        let title = issue_title(&package.name, check, &run.tool_version);
        let body = issue_body(&package.name, check, run, merge_date);

        match existing {
            None => {
                let mut labels = owners::labels_from_manifest(
                    &self.config.codeowners_path,
                    &package.name,
                    &package.service_directory,
                )?;
                labels.push(check.name().to_string());

                info!(
                    "Issue does not exist for {} with {check} version {}. Creating...",
                    package.name, run.tool_version
                );
                self.tracker
                    .create_issue(NewIssue {
                        title,
                        body,
                        labels,
                    })
                    .await
                    .context("Failed to create tracking issue")?;
            }
            Some(issue) => {
                info!(
                    "Issue exists for {} with {check} version {}. Updating...",
                    package.name, run.tool_version
                );
                self.tracker
                    .update_issue(issue.number, &title, &body)
                    .await
                    .context("Failed to update tracking issue")?;
            }
        }

        Ok(())
    }

    /// Record a passing run: close the package's tracking issue if one is
    /// open. No-op otherwise.
    pub async fn close_vnext_issue(&self, package_name: &str, check: CheckType) -> Result<()> {
        let issues = self
            .tracker
            .list_open_issues(check.name(), &self.config.bot_login)
            .await
            .context("Failed to list open tracking issues")?;

        if let Some(issue) = issues
            .into_iter()
            .find(|issue| title_package(&issue.title) == package_name)
        {
            info!(
                "{package_name} passes {check}. Closing existing issue #{}...",
                issue.number
            );
            self.tracker
                .close_issue(issue.number)
                .await
                .context("Failed to close tracking issue")?;
        }

        Ok(())
    }
}

/// The package a tracking issue refers to: the title text before the word
/// "needs", trimmed.
fn title_package(title: &str) -> &str {
    title.split("needs").next().unwrap_or(title).trim()
}

fn issue_title(package_name: &str, check: CheckType, version: &str) -> String {
    format!(
        "{package_name} needs {} updates for {check} version {version}",
        check.error_type()
    )
}

fn issue_body(
    package_name: &str,
    check: CheckType,
    run: &RunInfo,
    merge_date: NaiveDate,
) -> String {
    format!(
        "**ACTION NEEDED:** This version of {check} will be merged on **{merge_date}**. \
         The build will begin to fail for this library if errors are not fixed.\
         \n\n**Library name:** {package_name}\
         \n**{display} version:** {version}\
         \n**{display} Build:** [Link to build ({today})]({build_url})\
         \n**How to fix:** Run the `next-{check}` tox command at the library package-level and \
         resolve the {error_type} errors.\n\
         1) `../{package_name}>pip install \"tox<5\"`\n\
         2) `../{package_name}>tox run -e next-{check} -c ../../../eng/tox/tox.ini --root .`\n\n\
         See the {guide} for more information.",
        check = check,
        merge_date = merge_date.format("%Y-%m-%d"),
        package_name = package_name,
        display = check.display_name(),
        version = run.tool_version,
        today = run.today.format("%Y-%m-%d"),
        build_url = run.build_url,
        error_type = check.error_type(),
        guide = check.guide_link(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_package_splits_on_needs() {
        assert_eq!(
            title_package("azure-storage-blob needs typing updates for mypy version 1.8.0"),
            "azure-storage-blob"
        );
    }

    #[test]
    fn test_title_package_without_marker_is_whole_title() {
        assert_eq!(title_package("  unrelated issue  "), "unrelated issue");
    }

    #[test]
    fn test_issue_title_wording() {
        assert_eq!(
            issue_title("azure-storage-blob", CheckType::Pylint, "3.0.3"),
            "azure-storage-blob needs linting updates for pylint version 3.0.3"
        );
    }

    #[test]
    fn test_issue_body_contents() {
        let run = RunInfo {
            tool_version: "1.8.0".to_string(),
            build_url: "https://dev.azure.com/azure-sdk/internal/_build/results?buildId=1"
                .to_string(),
            today: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        };
        let merge_date = schedule::next_merge_date(run.today);
        let body = issue_body("azure-storage-blob", CheckType::Mypy, &run, merge_date);

        assert!(body.contains("will be merged on **2024-04-15**"));
        assert!(body.contains("**Library name:** azure-storage-blob"));
        assert!(body.contains("**Mypy version:** 1.8.0"));
        assert!(body.contains("[Link to build (2024-03-10)]"));
        assert!(body.contains("`next-mypy` tox command"));
        assert!(body.contains("Typing Guide"));
    }

    #[test]
    fn test_package_identity_from_path() {
        let identity = PackageIdentity::from_path(Path::new("/repo/sdk/storage/azure-storage-blob"))
            .unwrap();
        assert_eq!(identity.name, "azure-storage-blob");
        assert_eq!(identity.service_directory, "storage");
    }

    #[test]
    fn test_package_identity_requires_parent() {
        assert!(PackageIdentity::from_path(Path::new("/")).is_err());
    }
}
