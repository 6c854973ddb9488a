//! Issue-queue statistics.

mod aggregator;
mod issue_stats;

pub use aggregator::{PAGE_SIZE, count_issues, count_open_issues, find_most_recent_by_status};
pub use issue_stats::IssueStats;
