use core::time::Duration;
use std::path::{Path, PathBuf};

/// Where the external analysis tools live and how long they may run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    /// Working directory of the tools; relative tool paths resolve against it.
    pub dir: PathBuf,
    pub timeout: Duration,
    pub drupal_check: String,
    pub phpcs: String,
    /// Coding standard used for the style scan.
    pub drupal_standard: String,
    /// Coding standard used for the language-compatibility scan.
    pub compat_standard: String,
    pub composer: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            timeout: Duration::from_mins(20),
            drupal_check: "./vendor/bin/drupal-check".into(),
            phpcs: "./vendor/bin/phpcs".into(),
            drupal_standard: "./vendor/drupal/coder/coder_sniffer/Drupal".into(),
            compat_standard: "./vendor/phpcompatibility/php-compatibility/PHPCompatibility".into(),
            composer: "composer".into(),
        }
    }
}

impl ToolSettings {
    /// Resolves a configured program against the tools directory.
    ///
    /// Bare names such as `composer` are left for `PATH` lookup.
    #[must_use]
    pub fn program(&self, program: &str) -> PathBuf {
        self.resolve(program)
    }

    /// Resolves a configured standard. Bare names such as `Drupal` are
    /// installed standards and pass through unchanged.
    #[must_use]
    pub fn standard(&self, standard: &str) -> PathBuf {
        self.resolve(standard)
    }

    fn resolve(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_relative() && path.components().count() > 1 {
            self.dir.join(path)
        } else {
            path.to_path_buf()
        }
    }
}
