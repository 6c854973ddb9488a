//! Report generation.
//!
//! Every renderer works from the same inputs: the evaluation reports and the
//! [`ReportField`]s selected for output. The field table fixes the column
//! order, the labels used by the table renderer, and how each value is
//! formatted. Null values render as empty cells in the table and CSV
//! formats and as `null` in JSON and YAML.

mod csv;
mod evaluation_report;
mod json;
mod report_field;
mod table;
mod yaml;

use crate::Result;

pub use evaluation_report::EvaluationReport;
pub use report_field::{FieldValue, REPORT_FIELDS, ReportField, select_fields};

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Csv,
    Yaml,
}

/// Shape of the output for formats that distinguish one report from many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A single evaluation, rendered as one record.
    PropertyList,
    /// A batch, rendered as a list of records even when it holds one.
    Rows,
}

pub fn render(
    format: ReportFormat,
    reports: &[EvaluationReport],
    fields: &[&ReportField],
    layout: Layout,
    use_colors: bool,
) -> Result<String> {
    let mut output = String::new();
    match format {
        ReportFormat::Table => table::generate(reports, fields, use_colors, &mut output)?,
        ReportFormat::Json => json::generate(reports, fields, layout, &mut output)?,
        ReportFormat::Csv => csv::generate(reports, fields, &mut output)?,
        ReportFormat::Yaml => yaml::generate(reports, fields, layout, &mut output)?,
    }
    Ok(output)
}
