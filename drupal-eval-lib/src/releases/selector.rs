//! Choosing a canonical release from a release listing.
//!
//! Releases are scanned in the order given. Callers that need newest-first
//! semantics must request that order from the registry; the list is never
//! re-sorted or reversed here.

use crate::error::EvalError;
use crate::registry::Release;
use core::fmt::{Display, Formatter};

/// Which releases qualify: a core line, optionally narrowed to one project major version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTarget {
    core: String,
    project_major: Option<char>,
}

impl ReleaseTarget {
    /// Targets a whole core line. Accepts `8` as well as `8.x`.
    #[must_use]
    pub fn core(token: &str) -> Self {
        Self {
            core: normalize_core_token(token),
            project_major: None,
        }
    }

    /// Targets the core line and project major version of `branch`.
    #[must_use]
    pub fn branch(branch: &super::Branch) -> Self {
        Self {
            core: branch.core_token(),
            project_major: Some(branch.project_major()),
        }
    }

    fn matches(&self, release: &Release) -> bool {
        let same_core = release.version.chars().take(3).eq(self.core.chars());
        let same_major = self.project_major.is_none_or(|m| {
            let mut buf = [0; 4];
            release.major.as_deref() == Some(m.encode_utf8(&mut buf))
        });
        same_core && same_major
    }
}

impl Display for ReleaseTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self.project_major {
            Some(major) => write!(f, "{}-{major}.x", self.core),
            None => f.write_str(&self.core),
        }
    }
}

fn normalize_core_token(token: &str) -> String {
    if token.ends_with(".x") {
        token.to_string()
    } else {
        format!("{token}.x")
    }
}

/// Picks the release a site builder would be steered to.
///
/// The first stable match wins; failing that, the first match of any stability.
pub fn find_recommended_release<'a>(project: &str, releases: &'a [Release], target: &ReleaseTarget) -> Result<&'a Release, EvalError> {
    releases
        .iter()
        .find(|r| r.is_stable() && target.matches(r))
        .or_else(|| releases.iter().find(|r| target.matches(r)))
        .ok_or_else(|| EvalError::NoMatchingRelease {
            project: project.to_string(),
            version: target.to_string(),
        })
}

/// Picks the first `dev` release of a core line.
pub fn find_dev_release<'a>(project: &str, releases: &'a [Release], core: &str) -> Result<&'a Release, EvalError> {
    let target = ReleaseTarget::core(core);
    releases
        .iter()
        .find(|r| r.is_dev() && target.matches(r))
        .ok_or_else(|| EvalError::NoDevRelease {
            project: project.to_string(),
            version: target.to_string(),
        })
}
