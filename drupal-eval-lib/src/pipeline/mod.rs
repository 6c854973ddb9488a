//! Per-project evaluation and batch orchestration.
//!
//! [`Evaluator::evaluate_one`] sequences the registry queries, release
//! selection, archive download, analysis tools, and scoring for one project
//! branch. [`Evaluator::evaluate_many`] runs it over a [`Manifest`].

mod batch;
mod download;
mod evaluator;
mod integration;
mod manifest;
mod options;
mod progress;

pub use batch::{BatchFailure, BatchOutcome};
pub use download::{ArchiveSource, DEFAULT_ARCHIVE_URL};
pub use evaluator::Evaluator;
pub use integration::{DEFAULT_INTEGRATION_MARKER, DEFAULT_SOURCE_URL, IntegrationCheck};
pub use manifest::{Manifest, ManifestEntry};
pub use options::{EvaluationOptions, OptionOverrides};
pub use progress::{NoProgress, Progress};
