use super::EvaluationReport;
use crate::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use ohno::bail;
use serde_json::{Value, json};

/// A single report cell.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    UInt(u64),
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// Text used by the table and CSV renderers.
    #[must_use]
    pub fn format(&self) -> String {
        match self {
            Self::UInt(u) => u.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => format!("{f:.2}"),
            Self::String(s) => s.clone(),
            Self::Boolean(b) => if *b { "yes" } else { "no" }.to_string(),
            Self::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::UInt(u) => json!(u),
            Self::Int(i) => json!(i),
            Self::Float(f) => json!(f),
            Self::String(s) => json!(s),
            Self::Boolean(b) => json!(b),
            Self::DateTime(_) => json!(self.format()),
        }
    }
}

#[derive(Debug)]
pub struct ReportField {
    pub name: &'static str,
    pub label: &'static str,
    pub extractor: fn(&EvaluationReport) -> Option<FieldValue>,
}

impl ReportField {
    #[must_use]
    pub fn value(&self, report: &EvaluationReport) -> Option<FieldValue> {
        (self.extractor)(report)
    }
}

macro_rules! field {
    ($name:ident, $label:expr, String) => {
        ReportField {
            name: stringify!($name),
            label: $label,
            extractor: |r| Some(FieldValue::String(r.$name.clone())),
        }
    };
    ($name:ident, $label:expr, optional String) => {
        ReportField {
            name: stringify!($name),
            label: $label,
            extractor: |r| r.$name.clone().map(FieldValue::String),
        }
    };
    ($name:ident, $label:expr, optional $variant:ident) => {
        ReportField {
            name: stringify!($name),
            label: $label,
            extractor: |r| r.$name.map(FieldValue::$variant),
        }
    };
    ($name:ident, $label:expr, $variant:ident) => {
        ReportField {
            name: stringify!($name),
            label: $label,
            extractor: |r| Some(FieldValue::$variant(r.$name)),
        }
    };
}

pub static REPORT_FIELDS: &[ReportField] = &[
    field!(name, "Name", String),
    field!(title, "Title", String),
    field!(branch, "Branch", String),
    field!(score, "Score (%)", Float),
    field!(scored_points, "Scored points", Float),
    field!(total_points, "Total points", Float),
    field!(security_advisory_coverage, "Security advisory coverage", optional String),
    field!(starred, "Stars", UInt),
    field!(usage, "Usage", optional UInt),
    field!(recommended_version, "Recommended version", String),
    field!(scanned_version, "Scanned version", String),
    field!(is_stable, "Stable", Boolean),
    field!(issues_total, "Open issues", UInt),
    field!(issues_priority_critical, "Critical issues", UInt),
    field!(issues_priority_major, "Major issues", UInt),
    field!(issues_priority_normal, "Normal issues", UInt),
    field!(issues_priority_minor, "Minor issues", UInt),
    field!(issues_category_bug, "Bug reports", UInt),
    field!(issues_category_feature, "Feature requests", UInt),
    field!(issues_category_support, "Support requests", UInt),
    field!(issues_category_task, "Tasks", UInt),
    field!(issues_category_plan, "Plans", UInt),
    field!(issues_status_rtbc, "RTBC issues", UInt),
    field!(issues_status_fixed_last, "Last fixed issue", optional DateTime),
    field!(releases_total, "Releases", UInt),
    field!(releases_last, "Last release", optional DateTime),
    field!(releases_days_since, "Days since last release", optional Int),
    field!(deprecation_errors, "Deprecation errors", optional UInt),
    field!(deprecation_file_errors, "Deprecation file errors", optional UInt),
    field!(phpcs_drupal_errors, "Coding standard errors", optional UInt),
    field!(phpcs_drupal_warnings, "Coding standard warnings", optional UInt),
    field!(phpcs_compat_errors, "PHP compatibility errors", optional UInt),
    field!(phpcs_compat_warnings, "PHP compatibility warnings", optional UInt),
    ReportField {
        name: "composer_validate",
        label: "Composer validation",
        extractor: |r| r.composer_validate.map(|o| FieldValue::String(o.to_string())),
    },
    field!(orca_integrated, "ORCA integrated", Boolean),
    field!(report_datetime, "Report date", DateTime),
];

/// Resolves `--fields` names in the order given; no names selects every field.
pub fn select_fields(names: &[String]) -> Result<Vec<&'static ReportField>> {
    if names.is_empty() {
        return Ok(REPORT_FIELDS.iter().collect());
    }

    names
        .iter()
        .map(|name| {
            let name = name.trim();
            match REPORT_FIELDS.iter().find(|f| f.name == name) {
                Some(field) => Ok(field),
                None => {
                    let known: Vec<_> = REPORT_FIELDS.iter().map(|f| f.name).collect();
                    bail!("unknown report field '{name}' (known fields: {})", known.join(", "))
                }
            }
        })
        .collect()
}
