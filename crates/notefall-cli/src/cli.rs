use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use notefall_core::{BeatmapConfig, ExportFormat, JsonExporter, TsvExporter};

#[derive(Parser)]
#[command(name = "notefall")]
#[command(about = "Four-lane falling-note rhythm game")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, default_value = "notefall.toml", env = "NOTEFALL_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Play in the terminal
    Play {
        #[command(flatten)]
        source: SourceArgs,

        /// Do not write results to the session directory
        #[arg(long)]
        no_log: bool,

        #[arg(long, value_enum, default_value_t = LogFormat::Tsv)]
        format: LogFormat,
    },

    /// Generate a beatmap and write it as JSON
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay a recorded input log against a beatmap
    Simulate {
        /// JSON array of {"lane": n, "time": t}
        inputs: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0)]
        tick_rate: f64,

        /// Append the result to a session log in this directory
        #[arg(long)]
        log: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = LogFormat::Tsv)]
        format: LogFormat,

        /// Print the result summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Overrides for the `[beatmap]` config section
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Beatmap JSON file
    #[arg(short, long)]
    pub beatmap: Option<PathBuf>,

    /// Music file to analyze
    #[arg(short, long)]
    pub music: Option<PathBuf>,

    /// Precomputed beat timestamps for the music file (JSON array)
    #[arg(long)]
    pub beats: Option<PathBuf>,

    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Track length in seconds
    #[arg(short = 'l', long)]
    pub track_length: Option<f64>,
}

impl SourceArgs {
    pub fn apply(&self, base: &BeatmapConfig) -> BeatmapConfig {
        BeatmapConfig {
            path: self.beatmap.clone().or_else(|| base.path.clone()),
            music_path: self.music.clone().or_else(|| base.music_path.clone()),
            beats: self.beats.clone().or_else(|| base.beats.clone()),
            seed: self.seed.or(base.seed),
            track_length: self.track_length.or(base.track_length),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Tsv,
    Json,
}

impl LogFormat {
    pub fn exporter(self) -> Box<dyn ExportFormat> {
        match self {
            Self::Tsv => Box::new(TsvExporter),
            Self::Json => Box::new(JsonExporter),
        }
    }
}
