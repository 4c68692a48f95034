//! Check types for vnext static-analysis runs.

use clap::ValueEnum;
use std::fmt;

/// A static-analysis check that CI runs against its next, unreleased version.
///
/// The check type determines the tracking issue's label, the wording of the
/// error category in titles and fix instructions, the contributor guide the
/// issue links to, and which pane of the build results the issue points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckType {
    /// The mypy type checker
    Mypy,
    /// The pyright type checker
    Pyright,
    /// The pylint linter
    Pylint,
    /// The sphinx docstring checker
    Sphinx,
}

impl CheckType {
    /// Tool name as invoked and as used for the issue label.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Mypy => "mypy",
            Self::Pyright => "pyright",
            Self::Pylint => "pylint",
            Self::Sphinx => "sphinx",
        }
    }

    /// Capitalized tool name for issue bodies.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mypy => "Mypy",
            Self::Pyright => "Pyright",
            Self::Pylint => "Pylint",
            Self::Sphinx => "Sphinx",
        }
    }

    /// Error category named in issue titles and fix instructions.
    #[must_use]
    pub fn error_type(self) -> &'static str {
        match self {
            Self::Mypy | Self::Pyright => "typing",
            Self::Pylint => "linting",
            Self::Sphinx => "docstring",
        }
    }

    /// Markdown link to the contributor guide for resolving this check.
    #[must_use]
    pub fn guide_link(self) -> &'static str {
        match self {
            Self::Pylint => {
                "[Pylint Guide](https://github.com/Azure/azure-sdk-for-python/blob/main/doc/dev/pylint_checking.md)"
            }
            Self::Sphinx => {
                "[Sphinx and docstring checker](https://github.com/Azure/azure-sdk-for-python/blob/main/doc/eng_sys_checks.md#sphinx-and-docstring-checker)"
            }
            Self::Mypy | Self::Pyright => {
                "[Typing Guide](https://github.com/Azure/azure-sdk-for-python/blob/main/doc/dev/static_type_checking.md#run-mypy)"
            }
        }
    }

    /// Fixed pane id of this check's job in the build-results UI.
    #[must_use]
    pub fn job_pane_id(self) -> &'static str {
        match self {
            Self::Mypy => "c4b2a078-69a7-55a2-d776-67715c71590f",
            Self::Pyright => "d243185e-b901-5eef-29fe-f7943e030451",
            Self::Pylint => "b33d1587-3539-5735-af43-e3e62f02ca4b",
            Self::Sphinx => "82919efa-82d6-5dc4-2e9a-f82117bff292",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
