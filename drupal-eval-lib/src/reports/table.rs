use super::{EvaluationReport, ReportField};
use crate::Result;
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Scores at or above this percentage are shown in green.
const GOOD_SCORE: f64 = 75.0;

/// Scores at or above this percentage are shown in yellow, below it in red.
const FAIR_SCORE: f64 = 50.0;

pub fn generate<W: Write>(reports: &[EvaluationReport], fields: &[&ReportField], use_colors: bool, writer: &mut W) -> Result<()> {
    let label_width = fields.iter().map(|f| f.label.len()).max().unwrap_or(0);

    for (index, report) in reports.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
            writeln!(writer, "═══════════════════════════════════════")?;
            writeln!(writer)?;
        }

        let heading = format!("{} {}", report.name, report.branch);
        if use_colors {
            writeln!(writer, "{}", heading.bold())?;
        } else {
            writeln!(writer, "{heading}")?;
        }

        for field in fields {
            let text = field.value(report).map(|v| v.format()).unwrap_or_default();
            let text = if use_colors && field.name == "score" {
                colorize_score(report.score, &text)
            } else {
                text
            };
            if text.is_empty() {
                writeln!(writer, "  {:<label_width$} :", field.label)?;
            } else {
                writeln!(writer, "  {:<label_width$} : {text}", field.label)?;
            }
        }
    }

    Ok(())
}

fn colorize_score(score: f64, text: &str) -> String {
    if score >= GOOD_SCORE {
        text.green().bold().to_string()
    } else if score >= FAIR_SCORE {
        text.yellow().bold().to_string()
    } else {
        text.red().bold().to_string()
    }
}
