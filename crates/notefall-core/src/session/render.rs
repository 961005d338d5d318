use serde::Serialize;

use crate::game::{JudgmentCounts, JudgmentTier, Rank, SessionPhase, SessionStats};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub phase: SessionPhase,
    pub elapsed: f64,
    /// Unresolved notes, only while playing
    pub notes: Vec<NoteSprite>,
    pub score: u32,
    pub combo: u32,
    pub judgment: Option<JudgmentDisplay>,
    /// Present in the Result phase
    pub result: Option<ResultSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoteSprite {
    pub index: usize,
    pub lane: usize,
    pub y: f64,
}

/// Most recent judgment and how long ago it happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JudgmentDisplay {
    pub tier: JudgmentTier,
    pub age: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub score: u32,
    pub max_combo: u32,
    pub counts: JudgmentCounts,
    pub accuracy: Option<f64>,
    pub rank: Rank,
    pub total_notes: usize,
    pub full_combo: bool,
}

impl ResultSummary {
    pub fn from_stats(stats: &SessionStats, total_notes: usize) -> Self {
        Self {
            score: stats.score,
            max_combo: stats.max_combo,
            counts: stats.counts,
            accuracy: stats.accuracy(),
            rank: stats.rank(),
            total_notes,
            full_combo: stats.is_full_combo(),
        }
    }

    /// Accuracy as a percentage, 0 when nothing was judged
    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy.unwrap_or(0.0) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_empty_stats() {
        let summary = ResultSummary::from_stats(&SessionStats::new(), 0);
        assert_eq!(summary.rank, Rank::E);
        assert_eq!(summary.accuracy, None);
        assert_eq!(summary.accuracy_percent(), 0.0);
        assert!(!summary.full_combo);
    }

    #[test]
    fn test_summary_from_stats() {
        let mut stats = SessionStats::new();
        for _ in 0..19 {
            stats.record(JudgmentTier::Perfect);
        }
        stats.record(JudgmentTier::Good);
        let summary = ResultSummary::from_stats(&stats, 20);
        // (19 * 100 + 50) / 2000
        assert!((summary.accuracy_percent() - 97.5).abs() < 1e-9);
        assert_eq!(summary.rank, Rank::S);
        assert_eq!(summary.max_combo, 20);
        assert!(summary.full_combo);

        stats.record(JudgmentTier::Miss);
        assert!(!ResultSummary::from_stats(&stats, 21).full_combo);
    }
}
