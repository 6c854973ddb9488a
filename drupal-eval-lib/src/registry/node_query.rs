use super::taxonomy::{Coded, CoreCompatibility, IssueCategory, IssuePriority, IssueStatus, NodeType};
use core::fmt::{Display, Formatter};
use std::collections::BTreeMap;

/// Sort direction for node listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// A set of filters sent to the node API.
///
/// Keys are kept sorted, which makes both the request URL and the
/// derived cache key deterministic regardless of construction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeQuery {
    filters: BTreeMap<String, String>,
}

impl NodeQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a filter, replacing any previous value for the same key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let _ = self.filters.insert(key.into(), value.to_string());
        self
    }

    /// Adds every filter of `other`, with `other` winning on conflicts.
    #[must_use]
    pub fn merge(mut self, other: &Self) -> Self {
        self.filters
            .extend(other.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    #[must_use]
    pub fn node_type(self, node_type: NodeType) -> Self {
        self.with("type", node_type)
    }

    #[must_use]
    pub fn machine_name(self, name: &str) -> Self {
        self.with("field_project_machine_name", name)
    }

    /// Restricts issues to the project with the given node id.
    #[must_use]
    pub fn project(self, nid: u64) -> Self {
        self.with("field_project", nid)
    }

    /// Restricts releases to the project with the given node id.
    #[must_use]
    pub fn release_project(self, nid: u64) -> Self {
        self.with("field_release_project", nid)
    }

    #[must_use]
    pub fn status(self, status: IssueStatus) -> Self {
        self.with("field_issue_status", status.code())
    }

    #[must_use]
    pub fn priority(self, priority: IssuePriority) -> Self {
        self.with("field_issue_priority", priority.code())
    }

    #[must_use]
    pub fn category(self, category: IssueCategory) -> Self {
        self.with("field_issue_category", category.code())
    }

    #[must_use]
    pub fn issue_version(self, version: &str) -> Self {
        self.with("field_issue_version", version)
    }

    #[must_use]
    pub fn core_compatibility(self, compat: CoreCompatibility) -> Self {
        self.with("taxonomy_vocabulary_6", compat.code())
    }

    #[must_use]
    pub fn sort(self, field: &str, direction: Direction) -> Self {
        self.with("sort", field).with("direction", direction.as_str())
    }

    #[must_use]
    pub fn page(self, page: u64) -> Self {
        self.with("page", page)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Display for NodeQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for (index, (key, value)) in self.pairs().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
