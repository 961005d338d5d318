use serde::Serialize;
use tracing::debug;

use crate::game::{JudgmentTier, SessionStats};
use crate::timeline::Timeline;

/// Result of matching one key press against the timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum JudgeOutcome {
    Judged {
        /// Index of the note in the timeline
        note: usize,
        tier: JudgmentTier,
        /// `input time - note time`; negative means early
        delta: f64,
    },
    /// No unresolved note in range. Nothing changed.
    NoMatch,
}

impl JudgeOutcome {
    pub fn tier(&self) -> Option<JudgmentTier> {
        match self {
            Self::Judged { tier, .. } => Some(*tier),
            Self::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Judged { .. })
    }
}

/// Stateless judgment rules applied to a timeline and its stats
pub struct JudgmentEngine;

impl JudgmentEngine {
    /// Judge a key press in `lane` at `elapsed` seconds.
    ///
    /// The closest unresolved note in the lane is taken (first in scan order
    /// on ties). Presses farther than the Bad window from every candidate
    /// return `NoMatch` and leave `timeline` and `stats` untouched.
    pub fn judge(
        timeline: &mut Timeline,
        stats: &mut SessionStats,
        lane: usize,
        elapsed: f64,
    ) -> JudgeOutcome {
        let Some((index, distance)) = timeline.nearest_unresolved(lane, elapsed) else {
            return JudgeOutcome::NoMatch;
        };
        let Some(tier) = JudgmentTier::classify(distance) else {
            return JudgeOutcome::NoMatch;
        };

        let note_time = timeline.note(index).map(|note| note.time).unwrap_or(elapsed);
        if !timeline.resolve(index, tier) {
            return JudgeOutcome::NoMatch;
        }
        stats.record(tier);

        debug!(
            "Lane {} note {} judged {} ({:+.3}s), combo {}",
            lane,
            index,
            tier,
            elapsed - note_time,
            stats.combo
        );

        JudgeOutcome::Judged {
            note: index,
            tier,
            delta: elapsed - note_time,
        }
    }

    /// Sweep overdue notes as Miss and record each one.
    ///
    /// Returns the indices of the notes missed by this call.
    pub fn sweep_misses(
        timeline: &mut Timeline,
        stats: &mut SessionStats,
        elapsed: f64,
    ) -> Vec<usize> {
        let missed = timeline.sweep_misses(elapsed);
        for _ in &missed {
            stats.record(JudgmentTier::Miss);
        }
        missed
    }
}
