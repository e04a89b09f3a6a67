//
// ─── SCORE BAND ────────────────────────────────────────────────────────────────
//

/// Qualitative label for a final score.
///
/// Thresholds on `score / total`, lower bound inclusive:
/// - `Perfect`: exactly 1.0
/// - `Excellent`: [0.9, 1.0)
/// - `Good`: [0.7, 0.9)
/// - `Fair`: [0.5, 0.7)
/// - `NeedsWork`: below 0.5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    Perfect,
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl ScoreBand {
    /// Band for a score fraction in `[0.0, 1.0]`.
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction >= 1.0 {
            Self::Perfect
        } else if fraction >= 0.9 {
            Self::Excellent
        } else if fraction >= 0.7 {
            Self::Good
        } else if fraction >= 0.5 {
            Self::Fair
        } else {
            Self::NeedsWork
        }
    }

    /// Band for `score` out of `total`, computed without floating point.
    ///
    /// A zero `total` is treated as a perfect run.
    #[must_use]
    pub fn from_score(score: u32, total: u32) -> Self {
        let score = u64::from(score.min(total));
        let total = u64::from(total);
        if score == total {
            Self::Perfect
        } else if score * 10 >= total * 9 {
            Self::Excellent
        } else if score * 10 >= total * 7 {
            Self::Good
        } else if score * 2 >= total {
            Self::Fair
        } else {
            Self::NeedsWork
        }
    }
}

//
// ─── SCORE SUMMARY ─────────────────────────────────────────────────────────────
//

/// Final result of a finished quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub score: u32,
    pub total: u32,
    pub band: ScoreBand,
}

impl ScoreSummary {
    #[must_use]
    pub fn new(score: u32, total: u32) -> Self {
        Self {
            score,
            total,
            band: ScoreBand::from_score(score, total),
        }
    }

    /// Score as a fraction of the total, `1.0` for an empty total.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            f64::from(self.score) / f64::from(self.total)
        }
    }
}
