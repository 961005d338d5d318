use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::beatmap::NoteSourceKind;
use crate::game::{JudgmentCounts, Rank};
use crate::playback::Playback;
use crate::session::{ResultSummary, Session};

/// One finished play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub timestamp: DateTime<Local>,
    pub music_file: Option<String>,
    pub source: Option<NoteSourceKind>,
    pub score: u32,
    pub max_combo: u32,
    pub counts: JudgmentCounts,
    pub total_notes: usize,
    pub accuracy: Option<f64>,
    pub rank: Rank,
    pub full_combo: bool,
}

impl PlayRecord {
    pub fn from_summary(
        summary: &ResultSummary,
        music_file: Option<String>,
        source: Option<NoteSourceKind>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            music_file,
            source,
            score: summary.score,
            max_combo: summary.max_combo,
            counts: summary.counts,
            total_notes: summary.total_notes,
            accuracy: summary.accuracy,
            rank: summary.rank,
            full_combo: summary.full_combo,
        }
    }

    pub fn from_session<P: Playback>(session: &Session<P>) -> Self {
        Self::from_summary(
            &session.result_summary(),
            session.music_file().map(str::to_string),
            session.note_source(),
        )
    }
}
