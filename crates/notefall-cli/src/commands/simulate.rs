//! Headless replay of a recorded input log.
//!
//! The session runs on a [`ManualClock`] stepped at a fixed tick rate. Each
//! recorded press is judged at its own timestamp before the tick that first
//! reaches it, so results do not depend on the tick rate.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use notefall_core::{
    BeatmapConfig, ManualClock, PlayRecord, ResultSummary, Session, SessionConfig, SessionLog,
    SessionPhase,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::format_summary;
use crate::cli::LogFormat;

/// One recorded key press
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct InputEvent {
    pub lane: usize,
    pub time: f64,
}

pub fn load_inputs(path: &Path) -> Result<Vec<InputEvent>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input log {}", path.display()))?;
    let mut inputs: Vec<InputEvent> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse input log {}", path.display()))?;
    inputs.retain(|input| input.time.is_finite());
    inputs.sort_by(|a, b| a.time.total_cmp(&b.time));
    Ok(inputs)
}

/// Play `inputs` through a fresh session and return the result screen.
pub fn simulate(
    beatmap: &BeatmapConfig,
    session_config: SessionConfig,
    inputs: &[InputEvent],
    tick_rate: f64,
) -> Result<(ResultSummary, PlayRecord)> {
    if !(tick_rate.is_finite() && tick_rate > 0.0) {
        bail!("Tick rate must be positive, got {}", tick_rate);
    }

    let loader = beatmap.loader()?;
    let clock = ManualClock::new(Some(loader.track().length));
    let mut session = Session::new(clock, loader, session_config);
    session.start()?;

    let frames = play_frames(&mut session, inputs, tick_rate);
    info!("Simulated {} frames", frames);
    Ok((session.result_summary(), PlayRecord::from_session(&session)))
}

/// Step a started session until it leaves Playing. Returns the frame count.
fn play_frames(session: &mut Session<ManualClock>, inputs: &[InputEvent], tick_rate: f64) -> u64 {
    let mut pending = inputs.iter().peekable();
    let mut frame: u64 = 0;
    while session.phase() == SessionPhase::Playing {
        frame += 1;
        let now = frame as f64 / tick_rate;
        session.playback_mut().advance_to(now);

        while let Some(input) = pending.next_if(|input| input.time <= now) {
            let outcome = session.key_down_at(input.lane, input.time);
            debug!("Input lane {} at {:.3}s: {:?}", input.lane, input.time, outcome);
        }

        session.tick();

        for event in session.drain_events() {
            debug!("Frame {}: {:?}", frame, event);
        }
    }
    frame
}

pub fn run(
    beatmap: &BeatmapConfig,
    session_config: SessionConfig,
    inputs_path: &Path,
    tick_rate: f64,
    log_dir: Option<&Path>,
    format: LogFormat,
    json: bool,
) -> Result<()> {
    let inputs = load_inputs(inputs_path)?;
    eprintln!("Loaded {} inputs from {}", inputs.len(), inputs_path.display());

    let (summary, record) = simulate(beatmap, session_config, &inputs, tick_rate)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for line in format_summary(&summary) {
            println!("{}", line);
        }
    }

    if let Some(dir) = log_dir {
        let mut log = SessionLog::new(dir, format.exporter());
        let path = log.start_session()?;
        log.append(&record)?;
        eprintln!("Result saved to {}", path.display());
    }

    Ok(())
}
