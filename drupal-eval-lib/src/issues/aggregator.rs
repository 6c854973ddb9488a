//! Issue counting across paginated listings.
//!
//! Counts are derived from at most two requests per filter set: the first page,
//! whose last-page link gives the page count, and the last page itself. Every
//! page before the last is assumed to be full.

use crate::error::EvalError;
use crate::registry::{Direction, Issue, IssueStatus, NodeQuery, NodeSource, NodeType, Project};

pub(crate) const LOG_TARGET: &str = "    issues";

/// Items per page served by the registry.
pub const PAGE_SIZE: u64 = 100;

/// Counts the issues of `project` matching `filters`.
///
/// Projects without an issue queue have zero issues, and no request is made.
pub async fn count_issues<S: NodeSource>(source: &S, project: &Project, filters: &NodeQuery) -> Result<u64, EvalError> {
    if !project.has_issue_queue {
        return Ok(0);
    }

    let query = filters.clone().project(project.nid).node_type(NodeType::ProjectIssue);
    let first = source.fetch_nodes(&query).await?;
    let pages = first.page_count();

    let total = if pages > 1 {
        let last = source.fetch_nodes(&query.page(pages)).await?;
        (pages - 1)
            .checked_mul(PAGE_SIZE)
            .and_then(|full| full.checked_add(last.len() as u64))
            .ok_or_else(|| EvalError::Registry {
                url: first.source.clone(),
                status: None,
                reason: format!("implausible page count {pages}"),
            })?
    } else {
        first.len() as u64
    };

    log::debug!(target: LOG_TARGET, "{total} issues of '{}' match [{filters}]", project.machine_name);
    Ok(total)
}

/// Counts issues in any open status, summing one count per status.
pub async fn count_open_issues<S: NodeSource>(source: &S, project: &Project, base: &NodeQuery) -> Result<u64, EvalError> {
    let mut total: u64 = 0;
    for status in IssueStatus::OPEN {
        total = total.saturating_add(count_issues(source, project, &base.clone().status(status)).await?);
    }
    Ok(total)
}

/// The most recently changed issue of `project` in `status`, if any.
pub async fn find_most_recent_by_status<S: NodeSource>(
    source: &S,
    project: &Project,
    status: IssueStatus,
) -> Result<Option<Issue>, EvalError> {
    if !project.has_issue_queue {
        return Ok(None);
    }

    let query = NodeQuery::new()
        .project(project.nid)
        .node_type(NodeType::ProjectIssue)
        .status(status)
        .sort("changed", Direction::Descending);

    source.fetch_nodes(&query).await?.first_item::<Issue>()
}

#[cfg(test)]
pub(crate) mod fake {
    use crate::error::EvalError;
    use crate::registry::{NodeList, NodeQuery, NodeSource};
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Serves canned issue pages and records every query it receives.
    #[derive(Debug, Default)]
    pub struct FakeRegistry {
        /// (required filters, page count, items on the last page)
        routes: Vec<(Vec<(String, String)>, u64, usize)>,
        latest: Vec<Value>,
        pub queries: Mutex<Vec<NodeQuery>>,
    }

    impl FakeRegistry {
        pub fn route(mut self, filters: &[(&str, &str)], pages: u64, last_page_items: usize) -> Self {
            let filters = filters.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
            self.routes.push((filters, pages, last_page_items));
            self
        }

        /// Appends an item to the listing served for sorted queries.
        pub fn latest(mut self, issue: Value) -> Self {
            self.latest.push(issue);
            self
        }

        pub fn query_count(&self) -> usize {
            self.queries.lock().unwrap().len()
        }
    }

    impl NodeSource for FakeRegistry {
        async fn fetch_nodes(&self, query: &NodeQuery) -> Result<NodeList, EvalError> {
            self.queries.lock().unwrap().push(query.clone());

            if query.get("sort").is_some() {
                return Ok(NodeList {
                    list: self.latest.clone(),
                    ..NodeList::default()
                });
            }

            let route = self
                .routes
                .iter()
                .find(|(filters, _, _)| filters.iter().all(|(k, v)| query.get(k) == Some(v.as_str())));

            let Some((_, pages, last_items)) = route else {
                return Ok(NodeList::default());
            };

            let requested: u64 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
            let items = if *pages <= 1 || requested == *pages { *last_items } else { 100 };
            Ok(NodeList {
                list: vec![json!({}); items],
                last: Some(format!("https://registry.test/node.json?page={pages}")),
                source: format!("https://registry.test/node.json?{query}"),
            })
        }
    }
}
