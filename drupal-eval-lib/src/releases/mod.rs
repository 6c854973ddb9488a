//! Branches, release selection, and release cadence.

mod branch;
mod release_stats;
mod selector;

pub use branch::Branch;
pub use release_stats::ReleaseStats;
pub use selector::{ReleaseTarget, find_dev_release, find_recommended_release};
