//! Batch manifests: a YAML list (or mapping) of projects to evaluate.
//!
//! ```yaml
//! ctools:
//!   name: ctools
//!   branch: 8.x-3.x-dev
//! token:
//!   name: token
//!   branch: 8.x-1.x-dev
//!   options:
//!     scan-stable: true
//! ```

use super::options::OptionOverrides;
use crate::error::EvalError;
use serde::Deserialize;
use serde_yaml::Value;

const MANIFEST_ENTRY: &str = "manifest";

/// One project to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// The mapping key, or `#N` for list items; used in error messages.
    pub label: String,
    pub name: String,
    pub branch: String,
    pub overrides: OptionOverrides,
}

#[derive(Debug, Default, Deserialize)]
struct RawEntry {
    name: Option<String>,
    branch: Option<String>,
    #[serde(default)]
    options: OptionOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parses a manifest, failing on the first malformed entry.
    pub fn parse(text: &str) -> Result<Self, EvalError> {
        let doc: Value = serde_yaml::from_str(text).map_err(|e| EvalError::configuration(MANIFEST_ENTRY, e.to_string()))?;

        let labelled: Vec<(String, Value)> = match doc {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (format!("#{}", i + 1), item))
                .collect(),
            Value::Mapping(map) => map.into_iter().map(|(key, item)| (key_label(&key), item)).collect(),
            _ => {
                return Err(EvalError::configuration(
                    MANIFEST_ENTRY,
                    "expected a list or mapping of projects",
                ));
            }
        };

        let entries = labelled
            .into_iter()
            .map(|(label, item)| ManifestEntry::from_value(label, item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ManifestEntry {
    fn from_value(label: String, value: Value) -> Result<Self, EvalError> {
        let raw: RawEntry = serde_yaml::from_value(value).map_err(|e| EvalError::configuration(&label, e.to_string()))?;

        let Some(name) = raw.name.filter(|n| !n.trim().is_empty()) else {
            return Err(EvalError::configuration(label, "missing required key 'name'"));
        };
        let Some(branch) = raw.branch.filter(|b| !b.trim().is_empty()) else {
            return Err(EvalError::configuration(label, "missing required key 'branch'"));
        };

        Ok(Self {
            label,
            name,
            branch,
            overrides: raw.options,
        })
    }
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => "?".to_string(),
    }
}
