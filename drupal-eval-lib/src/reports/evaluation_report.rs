use crate::analysis::ManifestOutcome;
use chrono::{DateTime, Utc};

/// The full result of evaluating one project branch.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub name: String,
    pub title: String,
    pub branch: String,

    /// Percentage of available points scored, to two decimals.
    pub score: f64,
    pub scored_points: f64,
    pub total_points: f64,

    pub security_advisory_coverage: Option<String>,
    pub starred: u64,
    pub usage: Option<u64>,

    pub recommended_version: String,
    pub scanned_version: String,
    pub is_stable: bool,

    pub issues_total: u64,
    pub issues_priority_critical: u64,
    pub issues_priority_major: u64,
    pub issues_priority_normal: u64,
    pub issues_priority_minor: u64,
    pub issues_category_bug: u64,
    pub issues_category_feature: u64,
    pub issues_category_support: u64,
    pub issues_category_task: u64,
    pub issues_category_plan: u64,
    pub issues_status_rtbc: u64,
    pub issues_status_fixed_last: Option<DateTime<Utc>>,

    pub releases_total: u64,
    pub releases_last: Option<DateTime<Utc>>,
    pub releases_days_since: Option<i64>,

    pub deprecation_errors: Option<u64>,
    pub deprecation_file_errors: Option<u64>,
    pub phpcs_drupal_errors: Option<u64>,
    pub phpcs_drupal_warnings: Option<u64>,
    pub phpcs_compat_errors: Option<u64>,
    pub phpcs_compat_warnings: Option<u64>,
    pub composer_validate: Option<ManifestOutcome>,
    pub orca_integrated: bool,

    pub report_datetime: DateTime<Utc>,
}
