//! Label resolution from the CODEOWNERS ownership manifest.
//!
//! The manifest interleaves `# PRLabel: %<label>` declarations with ownership
//! path lines of the form `/sdk/<service>[/<package>] @owner...`. A path line
//! inherits the most recent declaration above it. An exact package match wins
//! immediately; a service-level line is kept as a fallback and applied only
//! when no package line matched.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Directory prefix that ownership path lines must carry.
const SDK_PREFIX: &str = "/sdk/";

/// Prefix of owner-label declaration lines.
const LABEL_PREFIX: &str = "# PRLabel: %";

/// Marker identifying management-plane packages.
const MGMT_MARKER: &str = "mgmt";

/// Resolve issue labels for a package from manifest text.
///
/// Labels preserve first-seen order: `Mgmt` (when the package name carries
/// the management marker), then the matched package or fallback service
/// label, if any.
#[must_use]
pub fn resolve_labels(manifest: &str, package_name: &str, service_directory: &str) -> Vec<String> {
    let mut labels = Vec::new();
    if package_name.contains(MGMT_MARKER) {
        labels.push("Mgmt".to_string());
    }

    let mut current: Option<String> = None;
    let mut service_label: Option<String> = None;

    for line in manifest.lines() {
        if let Some(declared) = line.strip_prefix(LABEL_PREFIX) {
            current = Some(declared.trim().to_string());
            continue;
        }
        let Some(label) = current.as_deref() else {
            continue;
        };
        if !line.starts_with(SDK_PREFIX) {
            continue;
        }

        let path = line.split('@').next().unwrap_or_default();
        let segments: Vec<&str> = path
            .split('/')
            .filter(|part| !part.trim().is_empty())
            .skip(1)
            .collect();

        match segments.as_slice() {
            [service] => {
                if *service == service_directory {
                    service_label = Some(label.to_string());
                }
            }
            [_, library] => {
                if *library == package_name {
                    labels.push(label.to_string());
                    return labels;
                }
            }
            // A bare `/sdk/` entry or a path nested deeper than
            // service/package is too specific to match a library.
            _ => {}
        }
    }

    if let Some(fallback) = service_label {
        labels.push(fallback);
    }
    labels
}

/// Load the ownership manifest at `path` and resolve labels for a package.
pub fn labels_from_manifest(
    path: &Path,
    package_name: &str,
    service_directory: &str,
) -> Result<Vec<String>> {
    let manifest = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ownership manifest: {}", path.display()))?;
    Ok(resolve_labels(&manifest, package_name, service_directory))
}

/// Walk up from `start` to the enclosing repository root (the directory
/// holding `.git`).
#[must_use]
pub fn discover_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Default CODEOWNERS location for the repository containing `start`.
#[must_use]
pub fn default_codeowners(start: &Path) -> Option<PathBuf> {
    discover_repo_root(start).map(|root| root.join(".github").join("CODEOWNERS"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "\
# Catch-all for docs\n\
/doc/ @docs-team\n\
\n\
# PRLabel: %Storage\n\
/sdk/storage/azure-storage-blob @blob-owner\n\
/sdk/storage/ @storage-team\n\
\n\
# PRLabel: %Mgmt Storage\n\
/sdk/storage/azure-mgmt-storage @mgmt-owner\n\
\n\
# PRLabel: %Compute\n\
/sdk/compute/azure-compute-vm/tests @test-owner\n\
/sdk/compute/ @compute-team\n";

    #[test]
    fn test_exact_package_match() {
        assert_eq!(
            resolve_labels(MANIFEST, "azure-storage-blob", "storage"),
            vec!["Storage"]
        );
    }

    #[test]
    fn test_mgmt_package_with_matching_entry() {
        assert_eq!(
            resolve_labels(MANIFEST, "azure-mgmt-storage", "storage"),
            vec!["Mgmt", "Mgmt Storage"]
        );
    }

    #[test]
    fn test_mgmt_package_under_service_label() {
        let manifest = "\
# PRLabel: %Storage\n\
/sdk/storage/azure-mgmt-storage @owner\n";
        assert_eq!(
            resolve_labels(manifest, "azure-mgmt-storage", "storage"),
            vec!["Mgmt", "Storage"]
        );
    }

    #[test]
    fn test_mgmt_package_with_service_fallback_only() {
        // No package entry for this library; the service-level line applies.
        assert_eq!(
            resolve_labels(MANIFEST, "azure-mgmt-compute", "compute"),
            vec!["Mgmt", "Compute"]
        );
    }

    #[test]
    fn test_service_fallback_without_package_match() {
        // The `/sdk/storage/` line sits under the %Storage declaration, so
        // that is the label the fallback carries.
        assert_eq!(
            resolve_labels(MANIFEST, "azure-storage-queue", "storage"),
            vec!["Storage"]
        );
    }

    #[test]
    fn test_nested_paths_are_skipped() {
        // The compute/tests line is three segments deep and must not match,
        // but the service-level compute line still applies.
        assert_eq!(
            resolve_labels(MANIFEST, "azure-compute-vm", "compute"),
            vec!["Compute"]
        );
    }

    #[test]
    fn test_no_match_yields_empty() {
        assert_eq!(
            resolve_labels(MANIFEST, "azure-eventhub", "eventhub"),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_path_lines_before_any_label_are_ignored() {
        let manifest = "/sdk/storage/azure-storage-blob @owner\n";
        assert_eq!(
            resolve_labels(manifest, "azure-storage-blob", "storage"),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_package_match_wins_over_later_fallback() {
        assert_eq!(
            resolve_labels(MANIFEST, "azure-storage-blob", "storage"),
            vec!["Storage"]
        );
    }
}
