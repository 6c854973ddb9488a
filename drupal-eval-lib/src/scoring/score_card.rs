use core::ops::Add;

/// Accumulated points, threaded by value through every award.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreCard {
    scored: f64,
    total: f64,
}

impl ScoreCard {
    #[must_use]
    pub const fn new() -> Self {
        Self { scored: 0.0, total: 0.0 }
    }

    /// All `points` if `passes`, none otherwise. `points` count toward the total either way.
    #[must_use]
    pub fn award_binary(self, passes: bool, points: f64) -> Self {
        Self {
            scored: self.scored + if passes { points } else { 0.0 },
            total: self.total + points,
        }
    }

    /// Points falling linearly from `max_points` at zero by `coefficient` per unit of `value`.
    #[must_use]
    pub fn award_scaled(self, coefficient: f64, value: f64, max_points: f64) -> Self {
        Self {
            scored: self.scored + scaled_points(coefficient, value, max_points),
            total: self.total + max_points,
        }
    }

    #[must_use]
    pub const fn scored(&self) -> f64 {
        self.scored
    }

    #[must_use]
    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Scored points as a percentage of the total, to two decimals.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        round2(self.scored / self.total * 100.0)
    }
}

impl Add for ScoreCard {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            scored: self.scored + rhs.scored,
            total: self.total + rhs.total,
        }
    }
}

#[must_use]
pub fn scaled_points(coefficient: f64, value: f64, max_points: f64) -> f64 {
    coefficient.mul_add(-value, max_points).max(0.0)
}

#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
