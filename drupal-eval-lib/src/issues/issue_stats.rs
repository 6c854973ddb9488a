use super::aggregator::{count_issues, count_open_issues, find_most_recent_by_status};
use crate::error::EvalError;
use crate::registry::{IssueCategory, IssuePriority, IssueStatus, NodeQuery, NodeSource, Project};
use crate::releases::Branch;
use chrono::{DateTime, Utc};

/// Issue-queue statistics for one branch of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueStats {
    /// Open issues across every priority and category.
    pub total: u64,
    pub critical: u64,
    pub major: u64,
    pub normal: u64,
    pub minor: u64,
    pub bug: u64,
    pub feature: u64,
    pub support: u64,
    pub task: u64,
    pub plan: u64,
    /// Issues marked reviewed & tested by the community.
    pub rtbc: u64,
    /// When the most recent closed (fixed) issue last changed.
    pub last_fixed: Option<DateTime<Utc>>,
}

impl IssueStats {
    /// Gathers all issue statistics for `branch`, one query set at a time.
    pub async fn collect<S: NodeSource>(source: &S, project: &Project, branch: &Branch) -> Result<Self, EvalError> {
        let base = NodeQuery::new().issue_version(branch.as_str());

        let mut stats = Self {
            total: count_open_issues(source, project, &base).await?,
            ..Self::default()
        };

        for priority in [IssuePriority::Critical, IssuePriority::Major, IssuePriority::Normal, IssuePriority::Minor] {
            let count = count_open_issues(source, project, &base.clone().priority(priority)).await?;
            *stats.priority_slot(priority) = count;
        }

        for category in [
            IssueCategory::BugReport,
            IssueCategory::FeatureRequest,
            IssueCategory::SupportRequest,
            IssueCategory::Task,
            IssueCategory::Plan,
        ] {
            let count = count_open_issues(source, project, &base.clone().category(category)).await?;
            *stats.category_slot(category) = count;
        }

        stats.rtbc = count_issues(source, project, &base.clone().status(IssueStatus::Rtbc)).await?;
        stats.last_fixed = find_most_recent_by_status(source, project, IssueStatus::ClosedFixed)
            .await?
            .map(|issue| issue.changed);

        Ok(stats)
    }

    const fn priority_slot(&mut self, priority: IssuePriority) -> &mut u64 {
        match priority {
            IssuePriority::Critical => &mut self.critical,
            IssuePriority::Major => &mut self.major,
            IssuePriority::Normal => &mut self.normal,
            IssuePriority::Minor => &mut self.minor,
        }
    }

    const fn category_slot(&mut self, category: IssueCategory) -> &mut u64 {
        match category {
            IssueCategory::BugReport => &mut self.bug,
            IssueCategory::FeatureRequest => &mut self.feature,
            IssueCategory::SupportRequest => &mut self.support,
            IssueCategory::Task => &mut self.task,
            IssueCategory::Plan => &mut self.plan,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::super::aggregator::fake::FakeRegistry;
    use super::*;
    use serde_json::json;

    fn project() -> Project {
        serde_json::from_value(json!({
            "nid": 7,
            "field_project_machine_name": "demo",
            "field_project_has_issue_queue": true,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn collects_per_priority_and_category_counts() {
        let registry = FakeRegistry::default()
            .route(&[("field_issue_priority", "400"), ("field_issue_status", "1")], 1, 2)
            .route(&[("field_issue_priority", "300"), ("field_issue_status", "8")], 1, 3)
            .route(&[("field_issue_category", "1"), ("field_issue_status", "13")], 1, 4)
            .route(&[("field_issue_category", "5"), ("field_issue_status", "1")], 1, 1)
            .route(&[("field_issue_status", "14")], 1, 6)
            .route(&[("field_issue_status", "1")], 1, 10)
            .latest(json!({"nid": 1, "field_issue_status": 7, "changed": 1_700_000_000}));

        let branch = Branch::parse("8.x-2.x-dev").unwrap();
        let stats = IssueStats::collect(&registry, &project(), &branch).await.unwrap();

        assert_eq!(stats.critical, 2 + 6);
        assert_eq!(stats.major, 3 + 10 + 6);
        assert_eq!(stats.bug, 4 + 10 + 6);
        assert_eq!(stats.plan, 1 + 6);
        assert_eq!(stats.total, 10 + 6);
        assert_eq!(stats.rtbc, 6);
        assert_eq!(stats.last_fixed.map(|d| d.timestamp()), Some(1_700_000_000));

        let queries = registry.queries.lock().unwrap();
        assert!(
            queries
                .iter()
                .filter(|q| q.get("sort").is_none())
                .all(|q| q.get("field_issue_version") == Some("8.x-2.x-dev"))
        );
    }

    #[tokio::test]
    async fn issue_counts_are_zero_without_queue() {
        let registry = FakeRegistry::default().route(&[], 2, 50);
        let mut project = project();
        project.has_issue_queue = false;

        let branch = Branch::parse("7.x-1.x-dev").unwrap();
        let stats = IssueStats::collect(&registry, &project, &branch).await.unwrap();

        assert_eq!(stats, IssueStats::default());
        assert_eq!(registry.query_count(), 0);
    }
}
