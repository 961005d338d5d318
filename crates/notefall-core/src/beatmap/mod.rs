//! Beatmap sources.
//!
//! A beatmap is produced once per timeline by trying an ordered list of
//! [`NoteSourceStrategy`] values:
//!
//! - **BeatmapFile**: explicit notes from a JSON file
//! - **AudioAnalysis**: beats from a [`BeatDetector`] expanded into a pattern
//! - **FixedTempo**: 120 BPM random notes, never fails
//!
//! The first strategy that succeeds wins. If all fail the session gets an
//! empty beatmap and stays playable with a score of zero.

mod analysis;
mod file;
mod tempo;

pub use analysis::*;
pub use file::*;
pub use tempo::*;

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Track length assumed when playback cannot report one (3 minutes)
pub const DEFAULT_TRACK_LENGTH: f64 = 180.0;

/// One note to be played: lane and target time in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub lane: usize,
    pub time: f64,
}

impl NoteEvent {
    pub fn new(lane: usize, time: f64) -> Self {
        Self { lane, time }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NoteSourceKind {
    File,
    Audio,
    FixedTempo,
}

/// Full note schedule for a track
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Beatmap {
    pub notes: Vec<NoteEvent>,
    /// Track override requested by a beatmap file
    pub music_file: Option<String>,
    /// Strategy that produced the notes, `None` when every strategy failed
    pub source: Option<NoteSourceKind>,
}

impl Beatmap {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// The track the beatmap is generated for
#[derive(Debug, Clone, PartialEq)]
pub struct TrackInfo {
    pub music_path: Option<PathBuf>,
    /// Seconds
    pub length: f64,
}

impl Default for TrackInfo {
    fn default() -> Self {
        Self {
            music_path: None,
            length: DEFAULT_TRACK_LENGTH,
        }
    }
}

impl TrackInfo {
    pub fn new(music_path: Option<PathBuf>, length: Option<f64>) -> Self {
        Self {
            music_path,
            length: length
                .filter(|l| l.is_finite() && *l > 0.0)
                .unwrap_or(DEFAULT_TRACK_LENGTH),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoteSourceStrategy {
    BeatmapFile(PathBuf),
    AudioAnalysis,
    FixedTempo,
}

impl NoteSourceStrategy {
    pub fn kind(&self) -> NoteSourceKind {
        match self {
            Self::BeatmapFile(_) => NoteSourceKind::File,
            Self::AudioAnalysis => NoteSourceKind::Audio,
            Self::FixedTempo => NoteSourceKind::FixedTempo,
        }
    }

    /// Try this strategy once.
    pub fn generate(
        &self,
        track: &TrackInfo,
        detector: &dyn BeatDetector,
        rng: &mut StdRng,
    ) -> Result<Beatmap> {
        match self {
            Self::BeatmapFile(path) => load_beatmap_file(path),
            Self::AudioAnalysis => {
                let music_path = track.music_path.as_deref().ok_or_else(|| {
                    Error::AudioAnalysisUnavailable("no track to analyze".to_string())
                })?;
                let beats = detector.detect_beats(music_path)?;
                let notes = notes_from_beats(&beats, track.length, rng);
                if notes.is_empty() {
                    return Err(Error::AudioAnalysisUnavailable(format!(
                        "no usable beats in {} detected",
                        beats.len()
                    )));
                }
                Ok(Beatmap {
                    notes,
                    music_file: None,
                    source: Some(NoteSourceKind::Audio),
                })
            }
            Self::FixedTempo => Ok(Beatmap {
                notes: fixed_tempo_notes(track.length, rng),
                music_file: None,
                source: Some(NoteSourceKind::FixedTempo),
            }),
        }
    }
}

/// The usual fallback chain: file (if any), audio analysis, fixed tempo
pub fn default_strategies(beatmap_path: Option<&Path>) -> Vec<NoteSourceStrategy> {
    let mut strategies = Vec::with_capacity(3);
    if let Some(path) = beatmap_path {
        strategies.push(NoteSourceStrategy::BeatmapFile(path.to_path_buf()));
    }
    strategies.push(NoteSourceStrategy::AudioAnalysis);
    strategies.push(NoteSourceStrategy::FixedTempo);
    strategies
}

/// Run the strategies in order and return the first success.
pub fn select_beatmap(
    strategies: &[NoteSourceStrategy],
    track: &TrackInfo,
    detector: &dyn BeatDetector,
    rng: &mut StdRng,
) -> Beatmap {
    for strategy in strategies {
        match strategy.generate(track, detector, rng) {
            Ok(beatmap) => {
                info!(
                    "Generated {} notes from {} source",
                    beatmap.notes.len(),
                    strategy.kind()
                );
                return beatmap;
            }
            Err(e) => {
                warn!("{} note source failed: {}", strategy.kind(), e);
            }
        }
    }

    warn!("No note source succeeded, playing without notes");
    Beatmap::empty()
}

/// Owns everything needed to (re)generate a session's beatmap
pub struct BeatmapLoader {
    strategies: Vec<NoteSourceStrategy>,
    track: TrackInfo,
    detector: Box<dyn BeatDetector>,
    rng: StdRng,
    seed: u64,
}

impl BeatmapLoader {
    pub fn new(strategies: Vec<NoteSourceStrategy>, track: TrackInfo, seed: u64) -> Self {
        Self {
            strategies,
            track,
            detector: Box::new(NoBeatDetector),
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn with_detector(mut self, detector: Box<dyn BeatDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn track(&self) -> &TrackInfo {
        &self.track
    }

    /// Generate a fresh beatmap. Successive calls continue the same RNG
    /// stream, so replays get new random notes while staying reproducible.
    pub fn load(&mut self) -> Beatmap {
        select_beatmap(
            &self.strategies,
            &self.track,
            self.detector.as_ref(),
            &mut self.rng,
        )
    }
}
