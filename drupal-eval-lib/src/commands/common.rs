//! Common processing logic shared between the evaluate and create-report commands.

use super::Host;
use super::ProgressReporter;
use super::config::Config;
use crate::Result;
use crate::pipeline::{ArchiveSource, Evaluator, IntegrationCheck, Progress};
use crate::registry::{CacheLockGuard, RegistryClient, ResponseCache, acquire_cache_lock};
use crate::reports::{EvaluationReport, Layout, ReportField, ReportFormat, render, select_fields};
use camino::Utf8PathBuf;
use chrono::Utc;
use clap::Args;
use clap::ValueEnum;
use core::time::Duration;
use directories::BaseDirs;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    fn enabled(self, is_terminal: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the evaluate and create-report commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `drupal-eval.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory where registry responses are cached
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Directory where release archives are unpacked (default is the system temp directory)
    #[arg(long, value_name = "PATH")]
    pub work_dir: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Ignore cached registry responses and fetch everything fresh
    #[arg(long)]
    pub ignore_cached: bool,

    /// Show the error output of analysis tools that fail
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Report format
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = ReportFormat::Table, help_heading = "Report Output")]
    pub format: ReportFormat,

    /// Report only these fields, in this order
    #[arg(long, value_name = "FIELDS", value_delimiter = ',', help_heading = "Report Output")]
    pub fields: Vec<String>,

    /// Write the report to a file instead of to the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub output: Option<Utf8PathBuf>,
}

pub struct Common<'a, H: Host> {
    pub evaluator: Evaluator,
    host: &'a mut H,
    color: ColorMode,
    format: ReportFormat,
    fields: Vec<&'static ReportField>,
    output: Option<Utf8PathBuf>,
    _cache_lock: CacheLockGuard,
}

impl<'a, H: Host> Common<'a, H> {
    /// Create a new Common processor with logger, evaluator, and config
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the cache cannot be locked
    pub async fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        // Reject unknown fields before doing any network work
        let fields = select_fields(&args.fields)?;

        let current_dir = std::env::current_dir().into_app_err("could not determine the current directory")?;
        let current_dir = Utf8PathBuf::try_from(current_dir).into_app_err("the current directory is not valid UTF-8")?;
        let config = Config::load(&current_dir, args.config.as_ref())?;

        // Determine cache directory: use provided path or default cache directory for the platform
        let cache_dir = if let Some(cache_path) = &args.cache_dir {
            cache_path.as_std_path().to_path_buf()
        } else {
            BaseDirs::new()
                .into_app_err("could not determine cache directory")?
                .cache_dir()
                .join("drupal-eval")
        };
        let registry_cache_dir = cache_dir.join("registry");
        let cache_lock = acquire_cache_lock(&registry_cache_dir).await?;

        let work_dir = args
            .work_dir
            .as_ref()
            .map_or_else(std::env::temp_dir, |dir| dir.as_std_path().to_path_buf());
        create_dir(&work_dir)?;

        let now = Utc::now();
        let cache = ResponseCache::new(registry_cache_dir, config.registry_cache_ttl, now, args.ignore_cached);
        let registry = RegistryClient::new(&config.registry_url, cache)?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("drupal-eval/", env!("CARGO_PKG_VERSION")))
            .build()
            .into_app_err("unable to create HTTP client")?;
        let archives = ArchiveSource::new(client.clone(), &config.archive_url);
        let integration = IntegrationCheck::new(client, &config.source_url, config.integration_marker.clone());

        let delay = if args.log_level == LogLevel::None {
            Duration::from_millis(300)
        } else {
            Duration::from_hours(365 * 24)
        };
        let use_colors_for_progress = args.color.enabled(|| {
            use std::io::{IsTerminal, stderr};
            stderr().is_terminal()
        });
        let progress_reporter = ProgressReporter::new(delay, use_colors_for_progress);

        let evaluator = Evaluator::new(
            registry,
            archives,
            integration,
            config.tool_settings(),
            work_dir,
            now,
            progress_reporter,
        )
        .with_verbose(args.verbose);

        Ok(Self {
            evaluator,
            host,
            color: args.color,
            format: args.format,
            fields,
            output: args.output.clone(),
            _cache_lock: cache_lock,
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // Only the first logger installed in a process takes effect.
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .try_init();
    }

    pub fn progress(&self) -> &dyn Progress {
        self.evaluator.progress()
    }

    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    /// Render reports in the selected format, to `--output` or the host's output.
    pub fn report(&mut self, reports: &[EvaluationReport], layout: Layout) -> Result<()> {
        let use_colors = self.output.is_none()
            && self.color.enabled(|| {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            });

        let text = render(self.format, reports, &self.fields, layout, use_colors)?;

        if let Some(path) = &self.output {
            fs::write(path, text).into_app_err_with(|| format!("writing {} report to '{path}'", self.format))?;
            let _ = writeln!(self.host.error(), "Wrote {} report to {path}", self.format);
        } else {
            let _ = write!(self.host.output(), "{text}");
        }

        Ok(())
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).into_app_err_with(|| format!("could not create directory '{}'", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_mode_auto_defers_to_terminal_check() {
        assert!(ColorMode::Always.enabled(|| false));
        assert!(!ColorMode::Never.enabled(|| true));
        assert!(ColorMode::Auto.enabled(|| true));
        assert!(!ColorMode::Auto.enabled(|| false));
    }
}
