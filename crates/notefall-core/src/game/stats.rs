use serde::{Deserialize, Serialize};

use crate::game::{JudgmentTier, PERFECT_SCORE, Rank};

/// Per-tier judgment counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgmentCounts {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub bad: u32,
    pub miss: u32,
}

impl JudgmentCounts {
    pub fn get(&self, tier: JudgmentTier) -> u32 {
        match tier {
            JudgmentTier::Perfect => self.perfect,
            JudgmentTier::Great => self.great,
            JudgmentTier::Good => self.good,
            JudgmentTier::Bad => self.bad,
            JudgmentTier::Miss => self.miss,
        }
    }

    pub fn increment(&mut self, tier: JudgmentTier) {
        let slot = match tier {
            JudgmentTier::Perfect => &mut self.perfect,
            JudgmentTier::Great => &mut self.great,
            JudgmentTier::Good => &mut self.good,
            JudgmentTier::Bad => &mut self.bad,
            JudgmentTier::Miss => &mut self.miss,
        };
        *slot += 1;
    }

    /// Number of notes resolved so far, misses included
    pub fn total(&self) -> u32 {
        self.perfect + self.great + self.good + self.bad + self.miss
    }

    /// Sum of `count * tier score` over every tier
    pub fn weighted_score(&self) -> u64 {
        JudgmentTier::ALL
            .iter()
            .map(|&tier| u64::from(self.get(tier)) * u64::from(tier.score()))
            .sum()
    }
}

/// Score, combo and counters for one playthrough
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub counts: JudgmentCounts,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one resolved note.
    pub fn record(&mut self, tier: JudgmentTier) {
        self.score += tier.score();
        self.counts.increment(tier);
        if tier.keeps_combo() {
            self.combo += 1;
        } else {
            self.combo = 0;
        }
        self.max_combo = self.max_combo.max(self.combo);
    }

    pub fn judged_notes(&self) -> u32 {
        self.counts.total()
    }

    /// Accuracy in `[0, 1]`, or `None` before any note was judged
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.judged_notes();
        if total == 0 {
            return None;
        }
        let max = u64::from(total) * u64::from(PERFECT_SCORE);
        Some(self.counts.weighted_score() as f64 / max as f64)
    }

    /// Rank of the play so far. A play without judged notes ranks E.
    pub fn rank(&self) -> Rank {
        self.accuracy().map(Rank::from_accuracy).unwrap_or(Rank::E)
    }

    /// No Bad or Miss yet and at least one note judged
    pub fn is_full_combo(&self) -> bool {
        self.judged_notes() > 0 && self.counts.bad == 0 && self.counts.miss == 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
