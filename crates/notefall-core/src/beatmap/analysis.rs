//! Beat-driven note generation.
//!
//! Beat detection itself happens outside the core. A [`BeatDetector`] hands
//! back beat timestamps and [`notes_from_beats`] expands them into lanes with
//! a fixed pattern cycle.

use std::fs;
use std::path::Path;

use rand::Rng;

use super::NoteEvent;
use crate::error::{Error, Result};
use crate::game::LANE_COUNT;

/// Beats before this are intro and get no notes
pub const INTRO_SKIP: f64 = 2.0;
/// No notes within this many seconds of the track end
pub const OUTRO_MARGIN: f64 = 1.0;
/// Chance that a filler beat keeps its note
pub const KEEP_PROBABILITY: f64 = 0.7;

/// External beat-tracking collaborator
pub trait BeatDetector {
    /// Beat timestamps in seconds for the given track.
    fn detect_beats(&self, track: &Path) -> Result<Vec<f64>>;
}

/// Detector used when no analysis backend is available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBeatDetector;

impl BeatDetector for NoBeatDetector {
    fn detect_beats(&self, _track: &Path) -> Result<Vec<f64>> {
        Err(Error::AudioAnalysisUnavailable(
            "no beat detector configured".to_string(),
        ))
    }
}

/// Beats computed ahead of time by an external tool
#[derive(Debug, Clone, Default)]
pub struct PrecomputedBeats {
    beats: Vec<f64>,
}

impl PrecomputedBeats {
    pub fn new(beats: Vec<f64>) -> Self {
        Self { beats }
    }

    /// Load a JSON array of beat timestamps.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let beats: Vec<f64> = serde_json::from_str(&content)?;
        Ok(Self::new(beats))
    }
}

impl BeatDetector for PrecomputedBeats {
    fn detect_beats(&self, _track: &Path) -> Result<Vec<f64>> {
        if self.beats.is_empty() {
            return Err(Error::AudioAnalysisUnavailable(
                "beat list is empty".to_string(),
            ));
        }
        Ok(self.beats.clone())
    }
}

/// Expand beat timestamps into notes.
///
/// After dropping intro beats, beat `i` becomes:
/// - `i % 16 == 0`: every lane at once
/// - `i % 8 == 0`: one lane rotating with `i / 8`
/// - `i % 4 == 0`: lanes {0, 1} or {2, 3}, alternating between occurrences
/// - otherwise: one random lane other than the previous note's, kept with
///   probability [`KEEP_PROBABILITY`]
///
/// Generation stops at the first beat within [`OUTRO_MARGIN`] of the end.
pub fn notes_from_beats<R: Rng + ?Sized>(
    beats: &[f64],
    track_length: f64,
    rng: &mut R,
) -> Vec<NoteEvent> {
    let mut beats: Vec<f64> = beats
        .iter()
        .copied()
        .filter(|t| t.is_finite() && *t >= INTRO_SKIP)
        .collect();
    beats.sort_by(f64::total_cmp);

    let mut notes: Vec<NoteEvent> = Vec::new();
    for (i, &time) in beats.iter().enumerate() {
        if time >= track_length - OUTRO_MARGIN {
            break;
        }

        if i % 16 == 0 {
            notes.extend((0..LANE_COUNT).map(|lane| NoteEvent::new(lane, time)));
        } else if i % 8 == 0 {
            notes.push(NoteEvent::new((i / 8) % LANE_COUNT, time));
        } else if i % 4 == 0 {
            let first = (i / 8) % 2 * 2;
            notes.push(NoteEvent::new(first, time));
            notes.push(NoteEvent::new(first + 1, time));
        } else {
            let lane = match notes.last() {
                Some(last) => {
                    let others: Vec<usize> =
                        (0..LANE_COUNT).filter(|&lane| lane != last.lane).collect();
                    others[rng.random_range(0..others.len())]
                }
                None => rng.random_range(0..LANE_COUNT),
            };
            if rng.random_bool(KEEP_PROBABILITY) {
                notes.push(NoteEvent::new(lane, time));
            }
        }
    }

    notes
}
