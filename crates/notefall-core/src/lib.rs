//! # notefall-core
//!
//! Timing, judgment and scheduling core for a four-lane falling-note rhythm
//! game.
//!
//! This crate provides:
//! - Beatmap generation with a fallback chain (file, beat analysis, fixed tempo)
//! - A time-ordered note timeline with miss sweeping
//! - Timing judgment, scoring, combo and rank
//! - The Title / Playing / Result session state machine
//! - Result logs in TSV and JSON
//!
//! Audio output and drawing are left to the caller. A session only needs a
//! [`Playback`] clock and lane presses.

pub mod beatmap;
pub mod config;
pub mod error;
pub mod game;
pub mod playback;
pub mod session;
pub mod storage;
pub mod timeline;

pub use beatmap::{
    BeatDetector, Beatmap, BeatmapFile, BeatmapLoader, NoBeatDetector, NoteEvent,
    NoteSourceKind, NoteSourceStrategy, PrecomputedBeats, TrackInfo, default_strategies,
    load_beatmap_file, parse_beatmap, select_beatmap,
};
pub use config::{BeatmapConfig, Config, KeyBindings};
pub use error::{Error, Result};
pub use game::{
    JudgeOutcome, JudgmentCounts, JudgmentEngine, JudgmentTier, LANE_COUNT, Rank,
    SessionCommand, SessionPhase, SessionStats,
};
pub use playback::{ManualClock, Playback, WallClock};
pub use session::{
    JudgmentDisplay, NoteSprite, RenderState, ResultSummary, Session, SessionConfig,
    SessionConfigBuilder, SessionEvent,
};
pub use storage::{ExportFormat, JsonExporter, PlayRecord, SessionLog, TsvExporter};
pub use timeline::{Note, Playfield, Timeline};
