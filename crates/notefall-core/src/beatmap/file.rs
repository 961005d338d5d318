//! JSON beatmap files.
//!
//! ```json
//! { "notes": [{ "lane": 0, "time": 2.5 }], "music_file": "song.mp3" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Beatmap, NoteEvent, NoteSourceKind};
use crate::error::{Error, Result};
use crate::game::LANE_COUNT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatmapFile {
    pub notes: Vec<RawNote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_file: Option<String>,
}

/// Note entry as written on disk, before lane/time validation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawNote {
    pub lane: i64,
    pub time: f64,
}

impl BeatmapFile {
    pub fn from_events(events: &[NoteEvent], music_file: Option<String>) -> Self {
        Self {
            notes: events
                .iter()
                .map(|event| RawNote {
                    lane: event.lane as i64,
                    time: event.time,
                })
                .collect(),
            music_file,
        }
    }

    /// Validate every entry. Out-of-range lanes are rejected, never clamped.
    pub fn into_beatmap(self) -> Result<Beatmap> {
        if self.notes.is_empty() {
            return Err(Error::MalformedBeatmap("beatmap has no notes".to_string()));
        }

        let mut notes = Vec::with_capacity(self.notes.len());
        for (index, raw) in self.notes.iter().enumerate() {
            let lane = usize::try_from(raw.lane)
                .ok()
                .filter(|&lane| lane < LANE_COUNT)
                .ok_or_else(|| {
                    Error::MalformedBeatmap(format!(
                        "note {} has lane {} (expected 0..{})",
                        index, raw.lane, LANE_COUNT
                    ))
                })?;
            if !raw.time.is_finite() || raw.time < 0.0 {
                return Err(Error::MalformedBeatmap(format!(
                    "note {} has invalid time {}",
                    index, raw.time
                )));
            }
            notes.push(NoteEvent::new(lane, raw.time));
        }

        Ok(Beatmap {
            notes,
            music_file: self.music_file,
            source: Some(NoteSourceKind::File),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse beatmap JSON. Missing fields and bad values are `MalformedBeatmap`.
pub fn parse_beatmap(content: &str) -> Result<Beatmap> {
    let file: BeatmapFile =
        serde_json::from_str(content).map_err(|e| Error::MalformedBeatmap(e.to_string()))?;
    file.into_beatmap()
}

pub fn load_beatmap_file<P: AsRef<Path>>(path: P) -> Result<Beatmap> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let beatmap = parse_beatmap(&content)?;
    debug!("Parsed {} notes from {}", beatmap.notes.len(), path.display());
    Ok(beatmap)
}
