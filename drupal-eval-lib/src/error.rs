//! Fatal failures of a single evaluation.
//!
//! Anything that would make the final score wrong (project identity, release
//! identity, issue counts, the scanned archive) surfaces as an [`EvalError`] and
//! aborts the evaluation. Analysis tool failures never appear here; they are
//! recovered as null metrics by the [`analysis`](crate::analysis) module.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    /// The registry answered with a non-success status, or could not be reached at all.
    #[error("request to {url} failed{}: {reason}", status.map(|s| format!(", returned {s}")).unwrap_or_default())]
    Registry {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// No project carries the requested machine name.
    #[error("no project with machine name '{name}' could be found")]
    ProjectNotFound { name: String },

    /// Neither a stable nor an unstable release matches the requested version.
    #[error("no release of '{project}' matches version {version}")]
    NoMatchingRelease { project: String, version: String },

    /// No `dev` release exists for the requested major version.
    #[error("no development release of '{project}' exists for version {version}")]
    NoDevRelease { project: String, version: String },

    /// The release archive could not be fetched or did not unpack to the expected path.
    #[error("could not download '{url}': {reason}")]
    Download { url: String, reason: String },

    /// A branch string or batch manifest entry is malformed.
    #[error("invalid entry '{entry}': {reason}")]
    Configuration { entry: String, reason: String },
}

impl EvalError {
    pub(crate) fn configuration(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn download(url: impl Into<String>, reason: impl core::fmt::Display) -> Self {
        Self::Download {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
