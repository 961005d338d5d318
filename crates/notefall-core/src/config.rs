//! User configuration loaded from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::beatmap::{
    BeatmapLoader, NoteSourceStrategy, PrecomputedBeats, TrackInfo, default_strategies,
};
use crate::error::Result;
use crate::game::LANE_COUNT;
use crate::session::SessionConfig;
use crate::timeline::Playfield;

/// Lane keys, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(pub [char; LANE_COUNT]);

impl Default for KeyBindings {
    fn default() -> Self {
        Self(['d', 'f', 'j', 'k'])
    }
}

impl KeyBindings {
    /// Lane bound to `key`, ignoring case
    pub fn lane_for(&self, key: char) -> Option<usize> {
        let key = key.to_ascii_lowercase();
        self.0
            .iter()
            .position(|bound| bound.to_ascii_lowercase() == key)
    }

    pub fn key_for(&self, lane: usize) -> Option<char> {
        self.0.get(lane).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeatmapConfig {
    pub path: Option<PathBuf>,
    pub music_path: Option<PathBuf>,
    /// JSON array of beat timestamps for `music_path`
    pub beats: Option<PathBuf>,
    /// Random when unset
    pub seed: Option<u64>,
    /// Overrides the track length reported by playback
    pub track_length: Option<f64>,
}

impl BeatmapConfig {
    pub fn strategies(&self) -> Vec<NoteSourceStrategy> {
        default_strategies(self.path.as_deref())
    }

    pub fn track(&self) -> TrackInfo {
        TrackInfo::new(self.music_path.clone(), self.track_length)
    }

    pub fn loader(&self) -> Result<BeatmapLoader> {
        let seed = self.seed.unwrap_or_else(rand::random);
        debug!("Beatmap seed: {}", seed);

        let loader = BeatmapLoader::new(self.strategies(), self.track(), seed);
        Ok(match &self.beats {
            Some(path) => loader.with_detector(Box::new(PrecomputedBeats::load(path)?)),
            None => loader,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keys: KeyBindings,
    pub playfield: Playfield,
    pub beatmap: BeatmapConfig,
    pub session_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: KeyBindings::default(),
            playfield: Playfield::default(),
            beatmap: BeatmapConfig::default(),
            session_dir: PathBuf::from("sessions"),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::builder().playfield(self.playfield).build()
    }
}
