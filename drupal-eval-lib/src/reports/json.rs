use super::{EvaluationReport, Layout, ReportField};
use crate::Result;
use core::fmt::Write;
use serde_json::{Map, Value};

/// One JSON object per report, holding the selected fields in order.
pub fn to_value(report: &EvaluationReport, fields: &[&ReportField]) -> Value {
    let object: Map<String, Value> = fields
        .iter()
        .map(|field| {
            let value = field.value(report).map_or(Value::Null, |v| v.to_json());
            (field.name.to_string(), value)
        })
        .collect();
    Value::Object(object)
}

pub(super) fn document(reports: &[EvaluationReport], fields: &[&ReportField], layout: Layout) -> Value {
    match (layout, reports) {
        (Layout::PropertyList, [report]) => to_value(report, fields),
        _ => Value::Array(reports.iter().map(|r| to_value(r, fields)).collect()),
    }
}

pub fn generate<W: Write>(reports: &[EvaluationReport], fields: &[&ReportField], layout: Layout, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(&document(reports, fields, layout))?)?;
    Ok(())
}
