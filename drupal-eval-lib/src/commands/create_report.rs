use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::pipeline::{EvaluationOptions, Manifest};
use crate::reports::Layout;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct CreateReportArgs {
    /// YAML file listing the projects to evaluate
    #[arg(value_name = "MANIFEST")]
    pub manifest: Utf8PathBuf,

    /// Scan recommended releases rather than development branches, unless an entry says otherwise
    #[arg(long)]
    pub scan_stable: bool,

    /// Keep evaluating after a project fails and report the ones that succeeded
    #[arg(long)]
    pub keep_going: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn create_report<H: Host>(host: &mut H, args: &CreateReportArgs) -> Result<()> {
    let text = fs::read_to_string(&args.manifest).into_app_err_with(|| format!("reading manifest '{}'", args.manifest))?;
    let manifest = Manifest::parse(&text)?;

    let mut common = Common::new(host, &args.common).await?;
    let defaults = EvaluationOptions {
        scan_stable: args.scan_stable,
    };

    let result = common.evaluator.evaluate_many(&manifest.entries, defaults, args.keep_going).await;
    common.progress().done();
    let outcome = result?;

    if !outcome.failures.is_empty() {
        let mut err = common.host().error();
        let _ = writeln!(err, "Unable to evaluate {} project(s)", outcome.failures.len());
        for failure in &outcome.failures {
            let _ = writeln!(err, "  {} {}: {}", failure.name, failure.branch, failure.reason);
        }
    }

    common.report(&outcome.reports, Layout::Rows)?;

    if !outcome.failures.is_empty() {
        bail!("{} of {} projects could not be evaluated", outcome.failures.len(), manifest.len());
    }

    Ok(())
}
