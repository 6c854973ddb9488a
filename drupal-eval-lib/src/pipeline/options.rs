use serde::Deserialize;

/// Knobs that change how a single project is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// Scan the recommended release instead of the branch's development snapshot.
    pub scan_stable: bool,
}

/// Per-entry overrides from a batch manifest. Unset values inherit the run's defaults.
///
/// Unrecognized keys are ignored so manifests written for older tools keep working.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct OptionOverrides {
    #[serde(default, alias = "scan-stable")]
    pub scan_stable: Option<bool>,
}

impl OptionOverrides {
    #[must_use]
    pub fn merged(self, defaults: EvaluationOptions) -> EvaluationOptions {
        EvaluationOptions {
            scan_stable: self.scan_stable.unwrap_or(defaults.scan_stable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_overrides_keep_defaults() {
        let defaults = EvaluationOptions { scan_stable: true };
        assert_eq!(OptionOverrides::default().merged(defaults), defaults);
    }

    #[test]
    fn set_overrides_win() {
        let overrides = OptionOverrides { scan_stable: Some(false) };
        assert!(!overrides.merged(EvaluationOptions { scan_stable: true }).scan_stable);
    }

    #[test]
    fn accepts_both_key_spellings() {
        let dashed: OptionOverrides = serde_yaml::from_str("scan-stable: true").unwrap();
        let underscored: OptionOverrides = serde_yaml::from_str("scan_stable: true").unwrap();
        assert_eq!(dashed, underscored);
        assert_eq!(dashed.scan_stable, Some(true));
    }

    #[test]
    fn ignores_unknown_keys() {
        let overrides: OptionOverrides = serde_yaml::from_str("skip-core-download: true").unwrap();
        assert_eq!(overrides, OptionOverrides::default());
    }
}
