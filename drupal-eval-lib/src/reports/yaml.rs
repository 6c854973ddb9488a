use super::{EvaluationReport, Layout, ReportField, json};
use crate::Result;
use core::fmt::Write;

pub fn generate<W: Write>(reports: &[EvaluationReport], fields: &[&ReportField], layout: Layout, writer: &mut W) -> Result<()> {
    let document = json::document(reports, fields, layout);
    write!(writer, "{}", serde_yaml::to_string(&document)?)?;
    Ok(())
}
