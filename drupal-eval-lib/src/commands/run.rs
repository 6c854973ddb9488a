//! Command dispatch logic for drupal-eval

use super::{CreateReportArgs, EvaluateArgs, InitArgs, create_report, evaluate_project, init_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "drupal-eval", author, version, long_about = None)]
#[command(about = "Evaluate the health of contributed Drupal projects")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: EvalSubcommand,
}

#[derive(Subcommand, Debug)]
enum EvalSubcommand {
    /// Evaluate one project branch and print its report
    Evaluate(Box<EvaluateArgs>),
    /// Evaluate every project listed in a YAML manifest
    CreateReport(Box<CreateReportArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match Cli::parse_from(args).command {
        EvalSubcommand::Evaluate(evaluate_args) => evaluate_project(host, &evaluate_args).await,
        EvalSubcommand::CreateReport(report_args) => create_report(host, &report_args).await,
        EvalSubcommand::Init(init_args) => init_config(host, &init_args),
    }
}
