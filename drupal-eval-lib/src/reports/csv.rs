use super::{EvaluationReport, ReportField};
use crate::Result;
use core::fmt::Write;
use ohno::IntoAppError;

/// A header row of field names, then one row per report.
pub fn generate<W: Write>(reports: &[EvaluationReport], fields: &[&ReportField], writer: &mut W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    csv.write_record(fields.iter().map(|f| f.name))?;
    for report in reports {
        csv.write_record(fields.iter().map(|f| f.value(report).map(|v| v.format()).unwrap_or_default()))?;
    }

    let bytes = csv.into_inner().into_app_err("flushing CSV output")?;
    write!(writer, "{}", String::from_utf8(bytes)?)?;
    Ok(())
}
