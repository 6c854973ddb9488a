use super::settings::ToolSettings;
use super::tool::AnalysisTool;
use core::fmt::{Display, Formatter};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;

/// Result of validating a project's `composer.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestOutcome {
    Passes,
    Warnings,
    Errors,
    /// The validator could not read the manifest at all.
    NullResult,
    Unknown(i32),
}

impl ManifestOutcome {
    #[must_use]
    pub const fn from_exit_code(code: i32) -> Self {
        match code {
            0 => Self::Passes,
            1 => Self::Warnings,
            2 => Self::Errors,
            3 => Self::NullResult,
            other => Self::Unknown(other),
        }
    }
}

impl Display for ManifestOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Passes => f.write_str("passes"),
            Self::Warnings => f.write_str("warnings"),
            Self::Errors => f.write_str("errors"),
            Self::NullResult => f.write_str("null"),
            Self::Unknown(code) => write!(f, "unknown ({code})"),
        }
    }
}

impl Serialize for ManifestOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestMetrics {
    pub outcome: Option<ManifestOutcome>,
}

/// Runs `composer validate --strict` inside the project.
#[derive(Debug, Clone)]
pub struct ManifestValidation {
    program: PathBuf,
}

impl ManifestValidation {
    #[must_use]
    pub fn new(settings: &ToolSettings) -> Self {
        Self {
            program: settings.program(&settings.composer),
        }
    }
}

impl AnalysisTool for ManifestValidation {
    type Metrics = ManifestMetrics;

    fn name(&self) -> &'static str {
        "composer validate"
    }

    fn command(&self, target: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        let _ = cmd.args(["validate", "--strict", "--no-interaction", "--no-ansi"]).current_dir(target);
        cmd
    }

    fn interpret(&self, output: &Output) -> Option<ManifestMetrics> {
        output.status.code().map(|code| ManifestMetrics {
            outcome: Some(ManifestOutcome::from_exit_code(code)),
        })
    }
}
