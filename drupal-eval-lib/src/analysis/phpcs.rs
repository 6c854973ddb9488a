//! Coding-standard scans with `phpcs`.
//!
//! `phpcs` exits non-zero whenever it finds violations, so the exit status is
//! ignored and only the JSON report on stdout decides success.

use super::settings::ToolSettings;
use super::tool::AnalysisTool;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;

/// Violation totals reported by `phpcs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViolationMetrics {
    pub errors: Option<u64>,
    pub warnings: Option<u64>,
}

impl ViolationMetrics {
    /// Errors plus warnings, or `None` when the scan failed.
    #[must_use]
    pub fn problems(&self) -> Option<u64> {
        Some(self.errors? + self.warnings?)
    }
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
    warnings: u64,
}

#[derive(Debug, Clone)]
struct Phpcs {
    program: PathBuf,
    standard: PathBuf,
    working_dir: PathBuf,
}

impl Phpcs {
    fn new(settings: &ToolSettings, standard: &str) -> Self {
        Self {
            program: settings.program(&settings.phpcs),
            standard: settings.standard(standard),
            working_dir: settings.dir.clone(),
        }
    }

    fn command(&self, target: &Path) -> Command {
        let mut standard = std::ffi::OsString::from("--standard=");
        standard.push(&self.standard);

        let mut cmd = Command::new(&self.program);
        let _ = cmd
            .arg(target)
            .arg(standard)
            .args(["--report=json", "-q", "--no-colors"])
            .current_dir(&self.working_dir);
        cmd
    }
}

fn interpret(output: &Output) -> Option<ViolationMetrics> {
    let report: Report = serde_json::from_slice(output.stdout.trim_ascii()).ok()?;
    Some(ViolationMetrics {
        errors: Some(report.totals.errors),
        warnings: Some(report.totals.warnings),
    })
}

/// Checks the project against the Drupal coding standard.
#[derive(Debug, Clone)]
pub struct StyleScan(Phpcs);

impl StyleScan {
    #[must_use]
    pub fn new(settings: &ToolSettings) -> Self {
        Self(Phpcs::new(settings, &settings.drupal_standard))
    }
}

impl AnalysisTool for StyleScan {
    type Metrics = ViolationMetrics;

    fn name(&self) -> &'static str {
        "phpcs (Drupal)"
    }

    fn command(&self, target: &Path) -> Command {
        self.0.command(target)
    }

    fn interpret(&self, output: &Output) -> Option<ViolationMetrics> {
        interpret(output)
    }
}

/// Checks the project for PHP version compatibility problems.
#[derive(Debug, Clone)]
pub struct CompatibilityScan(Phpcs);

impl CompatibilityScan {
    #[must_use]
    pub fn new(settings: &ToolSettings) -> Self {
        Self(Phpcs::new(settings, &settings.compat_standard))
    }
}

impl AnalysisTool for CompatibilityScan {
    type Metrics = ViolationMetrics;

    fn name(&self) -> &'static str {
        "phpcs (PHPCompatibility)"
    }

    fn command(&self, target: &Path) -> Command {
        self.0.command(target)
    }

    fn interpret(&self, output: &Output) -> Option<ViolationMetrics> {
        interpret(output)
    }
}
