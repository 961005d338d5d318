//! Session state machine.
//!
//! A [`Session`] owns one timeline and its stats and sequences
//! Title -> Playing -> Result. It is driven from outside:
//!
//! - commands (`start`, `abort`, `replay`, `quit`) move between phases
//! - `tick` once per frame reads the playback clock, sweeps misses and
//!   detects the end of the track
//! - `key_down` / `key_down_at` feed lane presses to the judgment engine
//! - `render_state` and `drain_events` hand results back

mod config;
mod events;
mod render;

pub use config::*;
pub use events::*;
pub use render::*;

use tracing::{debug, info, warn};

use crate::beatmap::{BeatmapLoader, NoteSourceKind};
use crate::error::{Error, Result};
use crate::game::{
    JudgeOutcome, JudgmentEngine, JudgmentTier, LANE_COUNT, SessionCommand, SessionPhase,
    SessionStats, next_phase,
};
use crate::playback::Playback;
use crate::timeline::Timeline;

#[derive(Debug, Clone, Copy, PartialEq)]
struct LastJudgment {
    tier: JudgmentTier,
    at: f64,
}

pub struct Session<P: Playback> {
    config: SessionConfig,
    playback: P,
    loader: BeatmapLoader,
    timeline: Timeline,
    stats: SessionStats,
    phase: SessionPhase,
    /// Clock snapshot taken by the last tick
    now: f64,
    music_file: Option<String>,
    source: Option<NoteSourceKind>,
    last_judgment: Option<LastJudgment>,
    events: Vec<SessionEvent>,
}

impl<P: Playback> Session<P> {
    /// Create a session on the title screen with a freshly generated timeline.
    pub fn new(playback: P, loader: BeatmapLoader, config: SessionConfig) -> Self {
        let mut session = Self {
            config,
            playback,
            loader,
            timeline: Timeline::default(),
            stats: SessionStats::new(),
            phase: SessionPhase::Title,
            now: 0.0,
            music_file: None,
            source: None,
            last_judgment: None,
            events: Vec::new(),
        };
        session.regenerate();
        session
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Elapsed time observed by the last tick
    pub fn elapsed(&self) -> f64 {
        self.now
    }

    pub fn music_file(&self) -> Option<&str> {
        self.music_file.as_deref()
    }

    pub fn note_source(&self) -> Option<NoteSourceKind> {
        self.source
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }

    /// Title -> Playing.
    ///
    /// Stats are reset and the playback clock restarted. If the track fails
    /// to load the session moves straight to Result with nothing judged and
    /// the `TrackLoadFailure` is returned.
    pub fn start(&mut self) -> Result<()> {
        self.transition(SessionCommand::Start)?;
        self.stats.reset();
        self.last_judgment = None;
        self.now = 0.0;

        if let Err(e) = self.playback.start() {
            warn!("Playback failed to start: {}", e);
            self.transition(SessionCommand::TrackFinished)?;
            return Err(e);
        }
        Ok(())
    }

    /// Playing -> Result on player request.
    pub fn abort(&mut self) -> Result<()> {
        self.transition(SessionCommand::Abort)?;
        self.playback.stop();
        Ok(())
    }

    /// Result -> Title with a regenerated timeline and zeroed stats.
    pub fn replay(&mut self) -> Result<()> {
        self.transition(SessionCommand::Replay)?;
        self.stats.reset();
        self.last_judgment = None;
        self.now = 0.0;
        self.regenerate();
        Ok(())
    }

    /// Any phase -> Terminated.
    pub fn quit(&mut self) -> Result<()> {
        self.transition(SessionCommand::Quit)?;
        self.playback.stop();
        Ok(())
    }

    /// Per-frame update. Does nothing outside Playing.
    pub fn tick(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }

        self.now = self.playback.current_elapsed_time();

        let missed = JudgmentEngine::sweep_misses(&mut self.timeline, &mut self.stats, self.now);
        for note in missed {
            let lane = self.timeline.note(note).map(|n| n.lane).unwrap_or_default();
            self.events.push(SessionEvent::Missed { lane, note });
        }

        if self.playback.is_track_finished() {
            debug!("Track finished at {:.3}s", self.now);
            // Playing -> Result is always allowed here
            let _ = self.transition(SessionCommand::TrackFinished);
        }
    }

    /// Judge a press in `lane` at the current tick's clock snapshot.
    pub fn key_down(&mut self, lane: usize) -> JudgeOutcome {
        self.key_down_at(lane, self.now)
    }

    /// Judge a press in `lane` at an explicit input timestamp.
    pub fn key_down_at(&mut self, lane: usize, elapsed: f64) -> JudgeOutcome {
        if self.phase != SessionPhase::Playing || lane >= LANE_COUNT {
            return JudgeOutcome::NoMatch;
        }

        let outcome = JudgmentEngine::judge(&mut self.timeline, &mut self.stats, lane, elapsed);
        if let JudgeOutcome::Judged { tier, delta, .. } = outcome {
            self.last_judgment = Some(LastJudgment { tier, at: elapsed });
            self.events.push(SessionEvent::Judged {
                lane,
                tier,
                delta,
                combo: self.stats.combo,
            });
        }
        outcome
    }

    pub fn result_summary(&self) -> ResultSummary {
        ResultSummary::from_stats(&self.stats, self.timeline.len())
    }

    pub fn render_state(&self) -> RenderState {
        let playing = self.phase == SessionPhase::Playing;
        let playfield = self.config.playfield;

        let notes = if playing {
            self.timeline
                .unresolved()
                .map(|(index, note)| NoteSprite {
                    index,
                    lane: note.lane,
                    y: playfield.note_y(note, self.now),
                })
                .collect()
        } else {
            Vec::new()
        };

        let judgment = self.last_judgment.and_then(|last| {
            let age = (self.now - last.at).max(0.0);
            (playing && age < self.config.judgment_display_time).then_some(JudgmentDisplay {
                tier: last.tier,
                age,
            })
        });

        let result = (self.phase == SessionPhase::Result).then(|| self.result_summary());

        RenderState {
            phase: self.phase,
            elapsed: self.now,
            notes,
            score: self.stats.score,
            combo: self.stats.combo,
            judgment,
            result,
        }
    }

    /// Take the events queued since the last call.
    ///
    /// Events accumulate until drained, so a frame loop should call this
    /// every frame.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn transition(&mut self, command: SessionCommand) -> Result<SessionPhase> {
        let from = self.phase;
        let to = next_phase(from, command).ok_or(Error::InvalidTransition {
            phase: from,
            command: command.name(),
        })?;
        info!("Session phase: {} -> {} ({})", from, to, command);
        self.phase = to;
        self.events.push(SessionEvent::PhaseChanged { from, to });
        Ok(to)
    }

    fn regenerate(&mut self) {
        let beatmap = self.loader.load();
        self.music_file = beatmap.music_file;
        self.source = beatmap.source;
        self.timeline = Timeline::new(beatmap.notes);
        info!(
            "Timeline ready: {} notes (seed {})",
            self.timeline.len(),
            self.loader.seed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::{NoteSourceStrategy, TrackInfo, default_strategies};
    use crate::playback::ManualClock;
    use std::fs;
    use std::path::Path;

    fn scenario_session(dir: &Path) -> Session<ManualClock> {
        let path = dir.join("beatmap.json");
        fs::write(
            &path,
            r#"{"notes": [{"lane": 0, "time": 2.0}, {"lane": 0, "time": 3.0}, {"lane": 0, "time": 4.0}]}"#,
        )
        .unwrap();
        let loader = BeatmapLoader::new(
            vec![NoteSourceStrategy::BeatmapFile(path)],
            TrackInfo::new(None, Some(10.0)),
            0,
        );
        Session::new(ManualClock::new(Some(10.0)), loader, SessionConfig::default())
    }

    fn random_session(seed: u64) -> Session<ManualClock> {
        let loader = BeatmapLoader::new(
            default_strategies(None),
            TrackInfo::new(None, Some(30.0)),
            seed,
        );
        Session::new(ManualClock::new(Some(30.0)), loader, SessionConfig::default())
    }

    fn tick_at(session: &mut Session<ManualClock>, time: f64) {
        session.playback_mut().advance_to(time);
        session.tick();
    }

    #[test]
    fn test_reference_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = scenario_session(dir.path());
        assert_eq!(session.note_source(), Some(NoteSourceKind::File));
        session.start().unwrap();

        tick_at(&mut session, 2.0);
        assert_eq!(session.key_down(0).tier(), Some(JudgmentTier::Perfect));

        tick_at(&mut session, 3.06);
        assert_eq!(session.key_down(0).tier(), Some(JudgmentTier::Good));

        tick_at(&mut session, 4.1);
        assert_eq!(session.stats().counts.miss, 0);
        tick_at(&mut session, 4.2);
        assert_eq!(session.stats().counts.miss, 1);

        assert_eq!(session.key_down_at(0, 100.0), JudgeOutcome::NoMatch);

        tick_at(&mut session, 10.0);
        assert_eq!(session.phase(), SessionPhase::Result);

        let summary = session.render_state().result.unwrap();
        assert_eq!(summary.score, 150);
        assert_eq!(summary.max_combo, 2);
        assert_eq!(summary.counts.perfect, 1);
        assert_eq!(summary.counts.good, 1);
        assert_eq!(summary.counts.miss, 1);
        assert_eq!(summary.total_notes, 3);
    }

    #[test]
    fn test_stray_press_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = scenario_session(dir.path());
        session.start().unwrap();
        tick_at(&mut session, 2.0);
        session.key_down(0);
        let before = session.stats().clone();

        tick_at(&mut session, 2.5);
        for lane in 0..LANE_COUNT {
            assert_eq!(session.key_down(lane), JudgeOutcome::NoMatch);
        }
        assert_eq!(session.key_down(7), JudgeOutcome::NoMatch);
        assert_eq!(session.stats(), &before);
    }

    #[test]
    fn test_presses_ignored_outside_playing() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = scenario_session(dir.path());
        assert_eq!(session.key_down_at(0, 2.0), JudgeOutcome::NoMatch);
        assert_eq!(session.timeline().resolved_count(), 0);
    }

    #[test]
    fn test_invalid_commands_are_rejected() {
        let mut session = random_session(1);
        assert!(matches!(
            session.abort(),
            Err(Error::InvalidTransition { phase: SessionPhase::Title, .. })
        ));
        assert!(session.replay().is_err());
        assert_eq!(session.phase(), SessionPhase::Title);

        session.start().unwrap();
        assert!(session.start().is_err());
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_abort_stops_playback() {
        let mut session = random_session(1);
        session.start().unwrap();
        assert!(session.playback().is_running());
        session.abort().unwrap();
        assert_eq!(session.phase(), SessionPhase::Result);
        assert!(!session.playback().is_running());
    }

    #[test]
    fn test_track_load_failure_goes_to_result() {
        let loader = BeatmapLoader::new(default_strategies(None), TrackInfo::default(), 3);
        let mut session = Session::new(
            ManualClock::failing("missing.mp3"),
            loader,
            SessionConfig::default(),
        );
        let err = session.start().unwrap_err();
        assert!(matches!(err, Error::TrackLoadFailure(_)));
        assert_eq!(session.phase(), SessionPhase::Result);

        let summary = session.result_summary();
        assert_eq!(summary.counts.total(), 0);
        assert_eq!(summary.rank, crate::game::Rank::E);
    }

    #[test]
    fn test_replay_resets_stats_and_regenerates_timeline() {
        let mut session = random_session(9);
        let first_notes: Vec<(usize, f64)> = session
            .timeline()
            .notes()
            .iter()
            .map(|n| (n.lane, n.time))
            .collect();

        session.start().unwrap();
        for step in 1..=40 {
            tick_at(&mut session, step as f64 * 0.5);
            for lane in 0..LANE_COUNT {
                session.key_down(lane);
            }
        }
        assert!(session.stats().judged_notes() > 0);
        session.abort().unwrap();

        session.replay().unwrap();
        assert_eq!(session.phase(), SessionPhase::Title);
        session.start().unwrap();

        assert_eq!(session.stats(), &SessionStats::default());
        assert_eq!(session.timeline().resolved_count(), 0);
        let second_notes: Vec<(usize, f64)> = session
            .timeline()
            .notes()
            .iter()
            .map(|n| (n.lane, n.time))
            .collect();
        assert_ne!(first_notes, second_notes);
    }

    #[test]
    fn test_hit_flags_flip_at_most_once() {
        let mut session = random_session(4);
        session.start().unwrap();
        let mut resolved_before = 0;
        for step in 1..=700 {
            let time = step as f64 / 20.0;
            tick_at(&mut session, time);
            session.key_down(step % LANE_COUNT);
            let resolved = session.timeline().resolved_count();
            assert!(resolved >= resolved_before);
            resolved_before = resolved;
        }
        assert_eq!(session.phase(), SessionPhase::Result);
        assert_eq!(
            session.stats().judged_notes() as usize,
            session.timeline().len()
        );
    }

    #[test]
    fn test_render_state_positions_and_judgment_age() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = scenario_session(dir.path());
        session.start().unwrap();

        tick_at(&mut session, 1.0);
        let state = session.render_state();
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.notes.len(), 3);
        // 2.0s note is one second above the judgment line
        assert_eq!(state.notes[0].y, 100.0);
        assert!(state.judgment.is_none());

        tick_at(&mut session, 2.0);
        session.key_down(0);
        let state = session.render_state();
        assert_eq!(state.notes.len(), 2);
        assert_eq!(state.score, 100);
        assert_eq!(state.combo, 1);
        assert_eq!(state.judgment.unwrap().tier, JudgmentTier::Perfect);

        tick_at(&mut session, 2.4);
        assert!(session.render_state().judgment.is_some());
        tick_at(&mut session, 2.6);
        assert!(session.render_state().judgment.is_none());
    }

    #[test]
    fn test_events_are_queued_and_drained() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = scenario_session(dir.path());
        session.drain_events();
        session.start().unwrap();
        tick_at(&mut session, 2.0);
        session.key_down(0);
        tick_at(&mut session, 5.0);

        let events = session.drain_events();
        assert_eq!(
            events[0],
            SessionEvent::PhaseChanged {
                from: SessionPhase::Title,
                to: SessionPhase::Playing
            }
        );
        let tiers: Vec<JudgmentTier> = events.iter().filter_map(|e| e.tier()).collect();
        assert_eq!(
            tiers,
            vec![JudgmentTier::Perfect, JudgmentTier::Miss, JudgmentTier::Miss]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_quit_from_result() {
        let mut session = random_session(2);
        session.start().unwrap();
        session.abort().unwrap();
        session.quit().unwrap();
        assert_eq!(session.phase(), SessionPhase::Terminated);
        assert!(session.quit().is_err());
    }

    #[test]
    fn test_same_seed_same_timeline() {
        let a = random_session(21);
        let b = random_session(21);
        assert_eq!(a.timeline().notes(), b.timeline().notes());
    }
}
