use super::evaluator::{Evaluator, LOG_TARGET};
use super::manifest::ManifestEntry;
use super::options::EvaluationOptions;
use crate::Result;
use crate::reports::EvaluationReport;
use ohno::EnrichableExt;

/// An entry that could not be evaluated during a `keep_going` batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub label: String,
    pub name: String,
    pub branch: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Reports in manifest order.
    pub reports: Vec<EvaluationReport>,
    pub failures: Vec<BatchFailure>,
}

impl Evaluator {
    /// Evaluates every manifest entry in order.
    ///
    /// Each entry's overrides are merged onto `defaults`. The first failure aborts the
    /// batch unless `keep_going` is set, in which case failures are collected instead.
    pub async fn evaluate_many(&self, entries: &[ManifestEntry], defaults: EvaluationOptions, keep_going: bool) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::default();

        for entry in entries {
            let options = entry.overrides.merged(defaults);
            match self.evaluate_one(&entry.name, &entry.branch, options).await {
                Ok(report) => outcome.reports.push(report),
                Err(e) if keep_going => {
                    log::warn!(target: LOG_TARGET, "Skipping '{}': {e:#}", entry.label);
                    outcome.failures.push(BatchFailure {
                        label: entry.label.clone(),
                        name: entry.name.clone(),
                        branch: entry.branch.clone(),
                        reason: format!("{e:#}"),
                    });
                }
                Err(e) => return Err(e.enrich_with(|| format!("could not evaluate '{}'", entry.label))),
            }
        }

        Ok(outcome)
    }
}
