//! Running an analysis tool in the background.
//!
//! [`start`] launches the tool and returns immediately; [`ToolHandle::end`]
//! waits for it and interprets its output. Only a failure to launch is an
//! error. A tool that crashes, times out, or prints nothing usable yields
//! empty (all-`None`) metrics.

use core::time::Duration;
use ohno::{IntoAppError, bail};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;
use tokio::task::JoinHandle;

pub(crate) const LOG_TARGET: &str = "  analysis";

/// An external program that inspects an unpacked project.
pub trait AnalysisTool: Send + 'static {
    /// What the tool measures; `Default` is the empty result.
    type Metrics: Default + Send + 'static;

    fn name(&self) -> &'static str;

    /// The command to run against `target`, without stdio configuration.
    fn command(&self, target: &Path) -> Command;

    /// Extracts metrics from a finished run, or `None` if the output is unusable.
    fn interpret(&self, output: &Output) -> Option<Self::Metrics>;
}

/// A tool launched by [`start`], or one that was skipped.
#[derive(Debug)]
pub struct ToolHandle<T: AnalysisTool> {
    tool: T,
    target: PathBuf,
    task: Option<JoinHandle<crate::Result<Output>>>,
}

/// Launches `tool` against `target`, bounding its run time by `timeout`.
pub fn start<T: AnalysisTool>(tool: T, target: &Path, timeout: Duration) -> crate::Result<ToolHandle<T>> {
    let task = launch(&tool, target, timeout)?;
    Ok(ToolHandle {
        tool,
        target: target.to_path_buf(),
        task: Some(task),
    })
}

fn launch<T: AnalysisTool>(tool: &T, target: &Path, timeout: Duration) -> crate::Result<JoinHandle<crate::Result<Output>>> {
    let name = tool.name();
    let child = tool
        .command(target)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .into_app_err_with(|| format!("could not start {name}"))?;

    log::debug!(target: LOG_TARGET, "Started {name} against '{}'", target.display());

    Ok(tokio::spawn(async move {
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => output.into_app_err_with(|| format!("{name} failed to run")),
            Err(_elapsed) => bail!("{name} timed out after {} seconds", timeout.as_secs()),
        }
    }))
}

impl<T: AnalysisTool> ToolHandle<T> {
    /// A handle for a tool that does not apply; [`end`](Self::end) returns empty metrics.
    #[must_use]
    pub fn skipped(tool: T, target: &Path) -> Self {
        Self {
            tool,
            target: target.to_path_buf(),
            task: None,
        }
    }

    /// Waits for the tool and interprets its output.
    ///
    /// With `verbose`, failure reports include the tool's stderr.
    pub async fn end(mut self, verbose: bool) -> T::Metrics {
        let name = self.tool.name();
        let Some(task) = self.task.take() else {
            return T::Metrics::default();
        };

        let output = match task.await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                self.report_failure(&e.to_string(), None, verbose);
                return T::Metrics::default();
            }
            Err(e) => {
                self.report_failure(&format!("{name} task failed: {e}"), None, verbose);
                return T::Metrics::default();
            }
        };

        if let Some(metrics) = self.tool.interpret(&output) {
            log::debug!(target: LOG_TARGET, "{name} finished for '{}'", self.target.display());
            return metrics;
        }

        let reason = format!("{name} produced no usable output ({})", output.status);
        self.report_failure(&reason, Some(&output.stderr), verbose);
        T::Metrics::default()
    }

    fn report_failure(&self, reason: &str, stderr: Option<&[u8]>, verbose: bool) {
        log::debug!(target: LOG_TARGET, "Tool failure for '{}': {reason}", self.target.display());
        if verbose {
            let stderr = stderr.map(String::from_utf8_lossy).unwrap_or_default();
            log::warn!(target: LOG_TARGET, "{reason} for '{}'\n{}", self.target.display(), stderr.trim_end());
        }
    }
}

impl<T: AnalysisTool> Drop for ToolHandle<T> {
    fn drop(&mut self) {
        // Aborting drops the child, which kills it.
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
