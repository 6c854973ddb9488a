use crate::registry::Release;
use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Release cadence figures for one core line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseStats {
    pub total: u64,
    pub last: Option<DateTime<Utc>>,
    /// Whole days between the latest release and `now`, rounded to nearest.
    pub days_since_last: Option<i64>,
}

impl ReleaseStats {
    /// Summarizes a newest-first release listing.
    #[must_use]
    pub fn summarize(releases: &[Release], now: DateTime<Utc>) -> Self {
        let last = releases.first().map(|r| r.created);
        Self {
            total: releases.len() as u64,
            last,
            days_since_last: last.map(|created| days_between(created, now)),
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "day counts are far inside both ranges"
)]
fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    ((to - from).num_seconds() as f64 / SECONDS_PER_DAY).round() as i64
}
