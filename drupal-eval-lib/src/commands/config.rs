use crate::Result;
use crate::analysis::ToolSettings;
use crate::pipeline::{DEFAULT_ARCHIVE_URL, DEFAULT_INTEGRATION_MARKER, DEFAULT_SOURCE_URL};
use crate::registry::DEFAULT_REGISTRY_URL;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError, app_err};
use serde::Deserialize;
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "drupal-eval.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub registry_url: String,
    pub archive_url: String,
    pub source_url: String,

    /// Duration to keep registry responses before re-fetching
    #[serde(with = "humantime_serde")]
    pub registry_cache_ttl: Duration,

    /// Wall-clock limit for each analysis tool
    #[serde(with = "humantime_serde")]
    pub tool_timeout: Duration,

    /// Working directory of the analysis tools
    pub tools_dir: Utf8PathBuf,

    pub drupal_check: String,
    pub phpcs: String,
    pub drupal_standard: String,
    pub compat_standard: String,
    pub composer: String,

    pub integration_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        let tools = ToolSettings::default();
        Self {
            registry_url: DEFAULT_REGISTRY_URL.into(),
            archive_url: DEFAULT_ARCHIVE_URL.into(),
            source_url: DEFAULT_SOURCE_URL.into(),
            registry_cache_ttl: Duration::from_hours(24),
            tool_timeout: tools.timeout,
            tools_dir: Utf8PathBuf::from("."),
            drupal_check: tools.drupal_check,
            phpcs: tools.phpcs,
            drupal_standard: tools.drupal_standard,
            compat_standard: tools.compat_standard,
            composer: tools.composer,
            integration_marker: DEFAULT_INTEGRATION_MARKER.into(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `drupal-eval.toml` in `base_dir` is used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading drupal-eval configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading drupal-eval configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate().map_err(|e| e.enrich_with(|| format!("validating configuration file '{final_path}'")))?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("registry_url", &self.registry_url),
            ("archive_url", &self.archive_url),
            ("source_url", &self.source_url),
        ] {
            let _ = Url::parse(value).into_app_err_with(|| format!("{key} is not a valid URL: '{value}'"))?;
        }

        if self.tool_timeout.is_zero() {
            return Err(app_err!("tool_timeout must be greater than zero"));
        }

        for (key, value) in [
            ("drupal_check", &self.drupal_check),
            ("phpcs", &self.phpcs),
            ("drupal_standard", &self.drupal_standard),
            ("compat_standard", &self.compat_standard),
            ("composer", &self.composer),
            ("integration_marker", &self.integration_marker),
        ] {
            if value.trim().is_empty() {
                return Err(app_err!("{key} must not be empty"));
            }
        }

        Ok(())
    }

    /// How the analysis tools are located and bounded.
    #[must_use]
    pub fn tool_settings(&self) -> ToolSettings {
        ToolSettings {
            dir: self.tools_dir.as_std_path().to_path_buf(),
            timeout: self.tool_timeout,
            drupal_check: self.drupal_check.clone(),
            phpcs: self.phpcs.clone(),
            drupal_standard: self.drupal_standard.clone(),
            compat_standard: self.compat_standard.clone(),
            composer: self.composer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Config {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn default_config_toml_matches_defaults() {
        assert_eq!(parse(DEFAULT_CONFIG_TOML), Config::default());
    }

    #[test]
    fn default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn omitted_keys_take_defaults() {
        let config = parse("tool_timeout = \"90s\"\n");
        assert_eq!(config.tool_timeout, Duration::from_secs(90));
        assert_eq!(config.registry_url, DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("hosting_cache_ttl = \"1d\"\n").is_err());
    }

    #[test]
    fn zero_tool_timeout_is_rejected() {
        let config = Config {
            tool_timeout: Duration::ZERO,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_tool_command_is_rejected() {
        let config = Config {
            phpcs: "  ".into(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("phpcs"), "{err}");
    }

    #[test]
    fn bad_url_is_rejected() {
        let config = Config {
            archive_url: "not a url".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn tool_settings_carry_configured_values() {
        let config = parse("tools_dir = \"/opt/qa\"\ncomposer = \"/usr/local/bin/composer\"\ntool_timeout = \"5m\"\n");
        let settings = config.tool_settings();
        assert_eq!(settings.dir, std::path::Path::new("/opt/qa"));
        assert_eq!(settings.composer, "/usr/local/bin/composer");
        assert_eq!(settings.timeout, Duration::from_mins(5));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let output_path = base.join(CONFIG_FILE_NAME);
        Config::save_default(&output_path).unwrap();

        assert_eq!(Config::load(&base, Some(&output_path)).unwrap(), Config::default());
        assert_eq!(Config::load(&base, None).unwrap(), Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert_eq!(Config::load(&base, None).unwrap(), Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn invalid_file_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = base.join("bad.toml");
        fs::write(&path, "tool_timeout = \"0s\"\n").unwrap();

        let err = Config::load(&base, Some(&path)).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("validating configuration file"), "{message}");
        assert!(message.contains("bad.toml"), "{message}");
        assert!(message.contains("tool_timeout must be greater than zero"), "{message}");
    }
}
