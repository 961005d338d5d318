//! Interactive terminal play.
//!
//! The session runs on the main thread at a fixed frame rate against a
//! [`WallClock`]. A keyboard thread feeds [`InputAction`]s through a channel
//! and ctrl-c stops the shared [`FramePacer`].

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use anyhow::Result;
use crossterm::terminal;
use notefall_core::{
    Config, ExportFormat, JudgmentTier, Playback, PlayRecord, Session, SessionEvent, SessionLog,
    SessionPhase, WallClock,
};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use super::{format_summary, tier_style};
use crate::cli::LogFormat;
use crate::input::{self, InputAction};
use crate::pacer::FramePacer;

const FRAME_RATE: f64 = 60.0;

/// Restores cooked mode on drop
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Raw mode needs explicit carriage returns
fn line(text: impl AsRef<str>) {
    let mut stdout = io::stdout();
    let _ = write!(stdout, "{}\r\n", text.as_ref());
    let _ = stdout.flush();
}

/// Lazily created result log
struct ResultLog {
    log: SessionLog,
    started: bool,
}

impl ResultLog {
    fn new(dir: &Path, format: Box<dyn ExportFormat>) -> Self {
        Self {
            log: SessionLog::new(dir, format),
            started: false,
        }
    }

    fn append(&mut self, record: &PlayRecord) {
        if !self.started {
            if let Err(e) = self.log.start_session() {
                warn!("Failed to create session log: {}", e);
                return;
            }
            self.started = true;
        }
        if let Err(e) = self.log.append(record) {
            warn!("Failed to write result: {}", e);
        }
    }
}

pub fn run(config: &Config, no_log: bool, format: LogFormat) -> Result<()> {
    let pacer = Arc::new(FramePacer::from_rate(FRAME_RATE));
    let pacer_ctrlc = Arc::clone(&pacer);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal, stopping...");
        pacer_ctrlc.stop();
    })?;

    let loader = config.beatmap.loader()?;
    let clock = WallClock::new(loader.track().length);
    let mut session = Session::new(clock, loader, config.session_config());
    let mut results = (!no_log).then(|| ResultLog::new(&config.session_dir, format.exporter()));

    let (tx, rx) = mpsc::channel();
    let _raw = RawModeGuard::enable()?;
    let keyboard = input::spawn_keyboard_reader(Arc::clone(&pacer), config.keys, tx);

    show_title(&session, config);
    loop {
        step(&mut session, &rx);

        for event in session.drain_events() {
            report(&session, event, config, results.as_mut());
        }

        if session.phase() == SessionPhase::Terminated || !pacer.next_frame() {
            break;
        }
    }

    pacer.stop();
    let _ = keyboard.join();
    Ok(())
}

/// One frame: take this frame's clock reading, then judge the presses queued
/// since the last frame against it.
fn step<P: Playback>(session: &mut Session<P>, rx: &Receiver<InputAction>) {
    session.tick();
    handle_input(session, rx);
}

fn handle_input<P: Playback>(session: &mut Session<P>, rx: &Receiver<InputAction>) {
    while let Ok(action) = rx.try_recv() {
        let result = match (session.phase(), action) {
            (SessionPhase::Playing, InputAction::Lane(lane)) => {
                session.key_down(lane);
                Ok(())
            }
            (SessionPhase::Title, InputAction::Start) => session.start(),
            (SessionPhase::Playing, InputAction::Back) => session.abort(),
            (SessionPhase::Result, InputAction::Replay) => session.replay(),
            (_, InputAction::Back | InputAction::Quit) => session.quit(),
            _ => Ok(()),
        };
        if let Err(e) = result {
            line(format!("{}", e.red()));
        }
    }
}

fn show_title<P: Playback>(session: &Session<P>, config: &Config) {
    let keys: String = config.keys.0.iter().map(|k| k.to_ascii_uppercase()).collect();
    line(format!("{}", "NOTEFALL".bold()));
    line(format!(
        "{} notes, lanes {}  |  Space: start  Esc: quit",
        session.timeline().len(),
        keys
    ));
}

fn report<P: Playback>(
    session: &Session<P>,
    event: SessionEvent,
    config: &Config,
    results: Option<&mut ResultLog>,
) {
    match event {
        SessionEvent::Judged {
            lane,
            tier,
            delta,
            combo,
        } => {
            let lane_key = config.keys.key_for(lane).unwrap_or('?').to_ascii_uppercase();
            line(format!(
                "[{}] {:<7} {:+.3}s  combo {}  score {}",
                lane_key,
                tier.short_name().style(tier_style(tier)),
                delta,
                combo,
                session.stats().score
            ));
        }
        SessionEvent::Missed { lane, .. } => {
            let lane_key = config.keys.key_for(lane).unwrap_or('?').to_ascii_uppercase();
            let miss = JudgmentTier::Miss;
            line(format!("[{}] {}", lane_key, miss.short_name().style(tier_style(miss))));
        }
        SessionEvent::PhaseChanged { to, .. } => match to {
            SessionPhase::Playing => line("Go!  (Esc: abort)"),
            SessionPhase::Result => {
                line("");
                for text in format_summary(&session.result_summary()) {
                    line(text);
                }
                line("R: replay  Esc: quit");
                if let Some(results) = results {
                    results.append(&PlayRecord::from_session(session));
                }
            }
            SessionPhase::Title => show_title(session, config),
            SessionPhase::Terminated => line("Bye"),
        },
    }
}
