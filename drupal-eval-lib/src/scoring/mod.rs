//! Turning raw signals into a weighted score.

mod criteria;
mod score_card;

pub use criteria::{CRITERIA, Criterion, CriterionKind, ScoringInputs, max_points, score};
pub use score_card::{ScoreCard, round2, scaled_points};
