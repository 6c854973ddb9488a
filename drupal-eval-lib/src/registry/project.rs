use super::lenient;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A contributed project as described by the registry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Project {
    #[serde(deserialize_with = "lenient::u64_from_any")]
    pub nid: u64,

    #[serde(default)]
    pub title: String,

    #[serde(rename = "field_project_machine_name", default)]
    pub machine_name: String,

    #[serde(rename = "field_project_has_issue_queue", deserialize_with = "lenient::flag", default)]
    pub has_issue_queue: bool,

    #[serde(rename = "field_project_has_releases", deserialize_with = "lenient::flag", default)]
    pub has_releases: bool,

    #[serde(rename = "field_security_advisory_coverage", deserialize_with = "lenient::opt_string", default)]
    pub security_advisory_coverage: Option<String>,

    #[serde(rename = "flag_project_star_user", deserialize_with = "lenient::count", default)]
    pub star_count: u64,

    /// Installation counts keyed by branch version, e.g. `8.x-3.x`.
    #[serde(rename = "project_usage", deserialize_with = "lenient::usage_map", default)]
    pub usage: BTreeMap<String, u64>,
}

impl Project {
    #[must_use]
    pub fn is_security_covered(&self) -> bool {
        self.security_advisory_coverage.as_deref() == Some("covered")
    }

    #[must_use]
    pub fn usage_for(&self, version: &str) -> Option<u64> {
        self.usage.get(version).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_registry_project() {
        let project: Project = serde_json::from_value(json!({
            "nid": "17866",
            "title": "Chaos Tool Suite (ctools)",
            "field_project_machine_name": "ctools",
            "field_project_has_issue_queue": true,
            "field_project_has_releases": "1",
            "field_security_advisory_coverage": "covered",
            "flag_project_star_user": [{"id": "1"}, {"id": "2"}, {"id": "3"}],
            "project_usage": {"8.x-3.x": 250_000, "7.x-1.x": "400000"},
        }))
        .unwrap();

        assert_eq!(project.nid, 17866);
        assert_eq!(project.machine_name, "ctools");
        assert!(project.has_issue_queue);
        assert!(project.has_releases);
        assert!(project.is_security_covered());
        assert_eq!(project.star_count, 3);
        assert_eq!(project.usage_for("8.x-3.x"), Some(250_000));
        assert_eq!(project.usage_for("8.x-4.x"), None);
    }

    #[test]
    fn revoked_coverage_is_not_covered() {
        let project: Project = serde_json::from_value(json!({
            "nid": 1,
            "field_security_advisory_coverage": "revoked",
        }))
        .unwrap();

        assert!(!project.is_security_covered());
        assert!(!project.has_issue_queue);
        assert!(project.usage.is_empty());
    }
}
