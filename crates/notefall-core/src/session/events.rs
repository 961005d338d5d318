use serde::Serialize;

use crate::game::{JudgmentTier, SessionPhase};

/// Feedback for collaborators that react to play (hit sounds, overlays)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SessionEvent {
    Judged {
        lane: usize,
        tier: JudgmentTier,
        /// Input time minus note time
        delta: f64,
        combo: u32,
    },
    Missed {
        lane: usize,
        note: usize,
    },
    PhaseChanged {
        from: SessionPhase,
        to: SessionPhase,
    },
}

impl SessionEvent {
    /// Tier to play a feedback sound for, if any
    pub fn tier(&self) -> Option<JudgmentTier> {
        match self {
            Self::Judged { tier, .. } => Some(*tier),
            Self::Missed { .. } => Some(JudgmentTier::Miss),
            Self::PhaseChanged { .. } => None,
        }
    }
}
