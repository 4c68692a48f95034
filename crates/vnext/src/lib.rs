//! # vnext
//!
//! CI automation that tracks client libraries failing the next, unreleased
//! version of a static-analysis check ("vnext" runs). A failing run files or
//! refreshes a GitHub tracking issue for the library; a passing run closes
//! it.
//!
//! The pieces:
//! - [`schedule`]: quarterly merge-window date policy
//! - [`owners`]: label resolution from the CODEOWNERS manifest
//! - [`version`]: probing the checker for its running version
//! - [`tracker`]: issue tracker capability trait plus the GitHub backend
//! - [`sync`]: the synchronizer that drives at most one tracker mutation
//!   per invocation

pub mod checks;
pub mod config;
pub mod owners;
pub mod schedule;
pub mod sync;
pub mod tracker;
pub mod version;

pub use checks::CheckType;
pub use config::Config;
pub use sync::{IssueSynchronizer, PackageIdentity, RunInfo};
pub use tracker::{GitHubTracker, Issue, IssueTracker, NewIssue, TrackerError};
