//! Tool version probing.
//!
//! vnext runs install the checker ahead of its release, so the running
//! version is only known by asking the tool itself.

use crate::checks::CheckType;
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::process::Command;
use tracing::info;

/// Run `<tool> --version` and extract the first dotted version number.
///
/// A tool that is missing, exits non-zero, or reports no recognizable
/// version fails the run; there is nothing sensible to file an issue
/// against without a version.
pub fn detect(check: CheckType) -> Result<String> {
    let output = Command::new(check.name())
        .arg("--version")
        .output()
        .with_context(|| format!("Failed to run {check} --version"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "{check} --version exited with {}: {}",
            output.status,
            stderr.trim()
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = extract_version(&stdout).with_context(|| {
        format!(
            "No version number in {check} --version output: {}",
            stdout.trim()
        )
    })?;

    info!("Running {check} version {version}");
    Ok(version)
}

/// First `major.minor.patch` pattern in `output`.
#[must_use]
pub fn extract_version(output: &str) -> Option<String> {
    let pattern = Regex::new(r"\d+\.\d+\.\d+").unwrap();
    pattern.find(output).map(|m| m.as_str().to_string())
}
