//! Command-line interface and orchestration for drupal-eval
//!
//! The module implements three commands:
//!
//! - **evaluate**: Evaluate one project branch and print its report
//! - **create-report**: Evaluate every project in a YAML manifest and print
//!   one combined report
//! - **init**: Generate a default configuration file
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. The evaluating commands share the
//! `common` module, which sets up logging, loads the configuration, locks
//! the registry cache, builds the [`Evaluator`](crate::pipeline::Evaluator),
//! and renders the final report to the terminal or to `--output`.

mod common;
mod config;
mod create_report;
mod evaluate;
mod host;
mod init;
mod progress_reporter;
mod run;

#[cfg(debug_assertions)]
pub use config::Config;

pub use create_report::{CreateReportArgs, create_report};
pub use evaluate::{EvaluateArgs, evaluate_project};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use run::run;
