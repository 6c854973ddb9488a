use super::settings::ToolSettings;
use super::tool::AnalysisTool;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;

/// Deprecated-API findings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeprecationMetrics {
    pub errors: Option<u64>,
    pub file_errors: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Report {
    totals: Totals,
}

#[derive(Debug, Deserialize)]
struct Totals {
    #[serde(default)]
    errors: u64,
    #[serde(default)]
    file_errors: u64,
}

/// Scans for uses of deprecated core APIs with `drupal-check`.
#[derive(Debug, Clone)]
pub struct DeprecationScan {
    program: PathBuf,
    working_dir: PathBuf,
}

impl DeprecationScan {
    #[must_use]
    pub fn new(settings: &ToolSettings) -> Self {
        Self {
            program: settings.program(&settings.drupal_check),
            working_dir: settings.dir.clone(),
        }
    }

    /// Whether the scan is meaningful for a core major version.
    #[must_use]
    pub const fn applies_to(core_major: u8) -> bool {
        core_major >= 8
    }
}

impl AnalysisTool for DeprecationScan {
    type Metrics = DeprecationMetrics;

    fn name(&self) -> &'static str {
        "drupal-check"
    }

    fn command(&self, target: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        let _ = cmd
            .args(["--format=json", "--deprecations", "--no-interaction", "--no-ansi", "--no-progress"])
            .arg(target)
            .current_dir(&self.working_dir);
        cmd
    }

    fn interpret(&self, output: &Output) -> Option<DeprecationMetrics> {
        let report: Report = serde_json::from_slice(output.stdout.trim_ascii()).ok()?;
        Some(DeprecationMetrics {
            errors: Some(report.totals.errors),
            file_errors: Some(report.totals.file_errors),
        })
    }
}
