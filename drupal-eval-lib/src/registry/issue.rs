use super::lenient;
use super::taxonomy::{IssueCategory, IssuePriority, IssueStatus};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An issue in a project's queue.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Issue {
    #[serde(deserialize_with = "lenient::u64_from_any")]
    pub nid: u64,

    #[serde(default)]
    pub title: String,

    #[serde(rename = "field_issue_status")]
    pub status: IssueStatus,

    #[serde(rename = "field_issue_priority", default)]
    pub priority: Option<IssuePriority>,

    #[serde(rename = "field_issue_category", default)]
    pub category: Option<IssueCategory>,

    #[serde(rename = "field_issue_version", deserialize_with = "lenient::opt_string", default)]
    pub version: Option<String>,

    #[serde(deserialize_with = "lenient::timestamp")]
    pub changed: DateTime<Utc>,
}
