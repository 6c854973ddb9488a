//! The scoring model: eleven weighted criteria worth 60 points.

use super::score_card::ScoreCard;
use crate::analysis::ManifestOutcome;

/// The raw signals the criteria read.
///
/// Analysis metrics are optional; a missing metric scores as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringInputs {
    pub security_covered: bool,
    pub stable: bool,
    pub critical_issues: u64,
    pub major_issues: u64,
    pub rtbc_issues: u64,
    pub deprecation_errors: Option<u64>,
    pub style_problems: Option<u64>,
    pub compatibility_problems: Option<u64>,
    pub days_since_last_release: Option<i64>,
    pub manifest: Option<ManifestOutcome>,
    pub integrated: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum CriterionKind {
    Binary { points: f64 },
    Scaled { coefficient: f64, max_points: f64 },
}

#[derive(Debug)]
pub struct Criterion {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: CriterionKind,
    /// Pass/fail for binary criteria, a magnitude for scaled ones.
    pub extractor: fn(&ScoringInputs) -> f64,
}

impl Criterion {
    #[must_use]
    pub const fn max_points(&self) -> f64 {
        match self.kind {
            CriterionKind::Binary { points } => points,
            CriterionKind::Scaled { max_points, .. } => max_points,
        }
    }

    #[must_use]
    pub fn apply(&self, card: ScoreCard, inputs: &ScoringInputs) -> ScoreCard {
        let value = (self.extractor)(inputs);
        match self.kind {
            CriterionKind::Binary { points } => card.award_binary(value > 0.0, points),
            CriterionKind::Scaled { coefficient, max_points } => card.award_scaled(coefficient, value, max_points),
        }
    }
}

macro_rules! binary {
    ($name:expr, $description:expr, $points:expr, $extractor:expr) => {
        Criterion {
            name: $name,
            description: $description,
            kind: CriterionKind::Binary { points: $points },
            extractor: |inputs| if ($extractor)(inputs) { 1.0 } else { 0.0 },
        }
    };
}

macro_rules! scaled {
    ($name:expr, $description:expr, $coefficient:expr, $max:expr, $extractor:expr) => {
        Criterion {
            name: $name,
            description: $description,
            kind: CriterionKind::Scaled {
                coefficient: $coefficient,
                max_points: $max,
            },
            extractor: $extractor,
        }
    };
}

#[expect(clippy::cast_precision_loss, reason = "counts stay far below 2^52")]
fn count(value: u64) -> f64 {
    value as f64
}

fn optional_count(value: Option<u64>) -> f64 {
    value.map_or(0.0, count)
}

/// Releases dated in the future count as zero days old.
#[expect(clippy::cast_precision_loss, reason = "day counts stay far below 2^52")]
fn elapsed_days(value: Option<i64>) -> f64 {
    value.map_or(0.0, |days| days.max(0) as f64)
}

pub static CRITERIA: &[Criterion] = &[
    binary!(
        "security_advisory_coverage",
        "Covered by the security advisory policy",
        5.0,
        |i: &ScoringInputs| i.security_covered
    ),
    binary!(
        "is_stable",
        "Recommended release carries no pre-release qualifier",
        5.0,
        |i: &ScoringInputs| i.stable
    ),
    scaled!(
        "issues_priority_critical",
        "Open critical issues",
        1.5,
        5.0,
        |i| count(i.critical_issues)
    ),
    scaled!("issues_priority_major", "Open major issues", 1.0, 5.0, |i| count(i.major_issues)),
    scaled!(
        "issues_status_rtbc",
        "Issues waiting on a maintainer after community review",
        1.0,
        5.0,
        |i| count(i.rtbc_issues)
    ),
    scaled!(
        "deprecation_errors",
        "Uses of deprecated core APIs",
        0.1,
        5.0,
        |i| optional_count(i.deprecation_errors)
    ),
    scaled!(
        "phpcs_drupal",
        "Coding standard errors and warnings",
        0.01,
        5.0,
        |i| optional_count(i.style_problems)
    ),
    scaled!(
        "phpcs_compat",
        "PHP compatibility errors and warnings",
        0.75,
        5.0,
        |i| optional_count(i.compatibility_problems)
    ),
    scaled!(
        "releases_days_since",
        "Days since the latest release",
        0.01,
        5.0,
        |i| elapsed_days(i.days_since_last_release)
    ),
    binary!(
        "composer_validate",
        "composer.json validates cleanly",
        5.0,
        |i: &ScoringInputs| i.manifest == Some(ManifestOutcome::Passes)
    ),
    binary!(
        "orca_integrated",
        "Participates in the shared integration test harness",
        10.0,
        |i: &ScoringInputs| i.integrated
    ),
];

/// Scores `inputs` against every criterion.
#[must_use]
pub fn score(inputs: &ScoringInputs) -> ScoreCard {
    CRITERIA.iter().fold(ScoreCard::new(), |card, criterion| criterion.apply(card, inputs))
}

/// The most points any project can score.
#[must_use]
pub fn max_points() -> f64 {
    CRITERIA.iter().map(Criterion::max_points).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn exemplary() -> ScoringInputs {
        ScoringInputs {
            security_covered: true,
            stable: true,
            deprecation_errors: Some(0),
            style_problems: Some(0),
            compatibility_problems: Some(0),
            days_since_last_release: Some(0),
            manifest: Some(ManifestOutcome::Passes),
            integrated: true,
            ..ScoringInputs::default()
        }
    }

    #[test]
    fn total_is_sixty() {
        assert!(close(max_points(), 60.0));
        assert!(close(score(&ScoringInputs::default()).total(), 60.0));
        assert_eq!(CRITERIA.len(), 11);
    }

    #[test]
    fn exemplary_project_scores_full_marks() {
        let card = score(&exemplary());
        assert!(close(card.scored(), 60.0));
        assert!(close(card.percentage(), 100.0));
    }

    #[test]
    fn typical_unintegrated_project() {
        let inputs = ScoringInputs {
            days_since_last_release: Some(10),
            integrated: false,
            ..exemplary()
        };

        let card = score(&inputs);
        assert!(close(card.scored(), 49.9));
        assert!(close(card.percentage(), 83.17));
    }

    #[test]
    fn missing_metrics_score_as_zero_magnitudes() {
        let inputs = ScoringInputs {
            deprecation_errors: None,
            style_problems: None,
            compatibility_problems: None,
            days_since_last_release: None,
            manifest: None,
            ..exemplary()
        };

        let card = score(&inputs);
        assert!(close(card.scored(), 55.0));
    }

    #[test]
    fn heavy_issue_load_bottoms_out() {
        let inputs = ScoringInputs {
            critical_issues: 4,
            major_issues: 50,
            rtbc_issues: 3,
            ..exemplary()
        };

        let card = score(&inputs);
        assert!(close(card.scored(), 60.0 - 5.0 - 5.0 - 3.0));
    }

    #[test]
    fn future_release_dates_do_not_exceed_maximum() {
        let inputs = ScoringInputs {
            days_since_last_release: Some(-30),
            ..exemplary()
        };
        assert!(close(score(&inputs).scored(), 60.0));
    }

    #[test]
    fn every_percentage_is_within_bounds() {
        for critical in [0, 1, 10] {
            for days in [0, 100, 10_000] {
                let inputs = ScoringInputs {
                    critical_issues: critical,
                    days_since_last_release: Some(days),
                    ..ScoringInputs::default()
                };
                let pct = score(&inputs).percentage();
                assert!((0.0..=100.0).contains(&pct));
            }
        }
    }
}
