use super::lenient;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A published release of a project.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    /// Full version string, e.g. `8.x-3.2`.
    #[serde(rename = "field_release_version")]
    pub version: String,

    /// Pre-release qualifier such as `dev`, `alpha1` or `rc2`; absent for stable releases.
    #[serde(rename = "field_release_version_extra", deserialize_with = "lenient::opt_string", default)]
    pub extra: Option<String>,

    /// The project's own major version number, e.g. `3` in `8.x-3.2`.
    #[serde(rename = "field_release_version_major", deserialize_with = "lenient::opt_string", default)]
    pub major: Option<String>,

    #[serde(deserialize_with = "lenient::timestamp")]
    pub created: DateTime<Utc>,
}

impl Release {
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        self.extra.is_none()
    }

    #[must_use]
    pub fn is_dev(&self) -> bool {
        self.extra.as_deref() == Some("dev")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_qualifier_is_stable() {
        let release: Release = serde_json::from_value(json!({
            "field_release_version": "8.x-3.2",
            "field_release_version_extra": null,
            "field_release_version_major": "3",
            "created": "1577836800",
        }))
        .unwrap();

        assert!(release.is_stable());
        assert!(!release.is_dev());
        assert_eq!(release.major.as_deref(), Some("3"));
    }

    #[test]
    fn dev_qualifier_is_dev() {
        let release: Release = serde_json::from_value(json!({
            "field_release_version": "8.x-3.x-dev",
            "field_release_version_extra": "dev",
            "field_release_version_major": 3,
            "created": 1_577_836_800,
        }))
        .unwrap();

        assert!(!release.is_stable());
        assert!(release.is_dev());
    }
}
