//! External static-analysis tools.
//!
//! Each tool is launched in the background with [`start`] while the registry
//! is queried, and joined later with [`ToolHandle::end`].

mod deprecation;
mod manifest_validation;
mod phpcs;
mod settings;
mod tool;

pub use deprecation::{DeprecationMetrics, DeprecationScan};
pub use manifest_validation::{ManifestMetrics, ManifestOutcome, ManifestValidation};
pub use phpcs::{CompatibilityScan, StyleScan, ViolationMetrics};
pub use settings::ToolSettings;
pub use tool::{AnalysisTool, ToolHandle, start};
