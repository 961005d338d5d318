//! Playback clock collaborator.
//!
//! The audio side owns the clock. The core only starts/stops it and reads the
//! elapsed time once per tick.

use std::time::Instant;

use crate::error::{Error, Result};

pub trait Playback {
    /// Start (or restart) the track from zero.
    fn start(&mut self) -> Result<()>;

    fn stop(&mut self);

    /// Seconds since the track started playing.
    fn current_elapsed_time(&self) -> f64;

    fn is_track_finished(&self) -> bool;

    /// Track duration in seconds, if known before playback.
    fn track_length(&self) -> Option<f64> {
        None
    }
}

/// Externally driven clock for fixed-step drivers and tests.
///
/// Time only moves forward through [`ManualClock::advance_to`] and
/// [`ManualClock::advance`].
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    elapsed: f64,
    length: Option<f64>,
    running: bool,
    finished: bool,
    start_error: Option<String>,
}

impl ManualClock {
    pub fn new(length: Option<f64>) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    /// A clock whose `start` always fails, as if the track could not load.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            start_error: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn advance_to(&mut self, elapsed: f64) {
        if elapsed > self.elapsed {
            self.elapsed = elapsed;
        }
    }

    pub fn advance(&mut self, delta: f64) {
        self.advance_to(self.elapsed + delta);
    }

    /// Report the track as finished regardless of time.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Playback for ManualClock {
    fn start(&mut self) -> Result<()> {
        if let Some(reason) = &self.start_error {
            return Err(Error::TrackLoadFailure(reason.clone()));
        }
        self.elapsed = 0.0;
        self.finished = false;
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn current_elapsed_time(&self) -> f64 {
        self.elapsed
    }

    fn is_track_finished(&self) -> bool {
        self.finished || self.length.is_some_and(|length| self.elapsed >= length)
    }

    fn track_length(&self) -> Option<f64> {
        self.length
    }
}

/// Real-time clock for a track of known length, without audio output.
#[derive(Debug, Clone)]
pub struct WallClock {
    length: f64,
    started: Option<Instant>,
    stopped_at: Option<f64>,
}

impl WallClock {
    pub fn new(length: f64) -> Self {
        Self {
            length,
            started: None,
            stopped_at: None,
        }
    }
}

impl Playback for WallClock {
    fn start(&mut self) -> Result<()> {
        self.started = Some(Instant::now());
        self.stopped_at = None;
        Ok(())
    }

    fn stop(&mut self) {
        if self.stopped_at.is_none() {
            self.stopped_at = Some(self.current_elapsed_time());
        }
    }

    fn current_elapsed_time(&self) -> f64 {
        if let Some(stopped) = self.stopped_at {
            return stopped;
        }
        self.started
            .map(|start| start.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn is_track_finished(&self) -> bool {
        self.started.is_some() && self.current_elapsed_time() >= self.length
    }

    fn track_length(&self) -> Option<f64> {
        Some(self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_only_moves_forward() {
        let mut clock = ManualClock::new(Some(10.0));
        clock.start().unwrap();
        clock.advance_to(3.0);
        clock.advance_to(2.0);
        assert_eq!(clock.current_elapsed_time(), 3.0);
        clock.advance(0.5);
        assert_eq!(clock.current_elapsed_time(), 3.5);
    }

    #[test]
    fn test_manual_clock_finishes_at_length() {
        let mut clock = ManualClock::new(Some(10.0));
        clock.start().unwrap();
        clock.advance_to(9.99);
        assert!(!clock.is_track_finished());
        clock.advance_to(10.0);
        assert!(clock.is_track_finished());
    }

    #[test]
    fn test_manual_clock_restart_resets_time() {
        let mut clock = ManualClock::new(None);
        clock.start().unwrap();
        clock.advance_to(50.0);
        clock.finish();
        assert!(clock.is_track_finished());

        clock.start().unwrap();
        assert_eq!(clock.current_elapsed_time(), 0.0);
        assert!(!clock.is_track_finished());
    }

    #[test]
    fn test_failing_clock() {
        let mut clock = ManualClock::failing("missing.mp3");
        let err = clock.start().unwrap_err();
        assert!(matches!(err, Error::TrackLoadFailure(_)));
        assert!(!clock.is_running());
    }

    #[test]
    fn test_wall_clock_not_started() {
        let clock = WallClock::new(1.0);
        assert_eq!(clock.current_elapsed_time(), 0.0);
        assert!(!clock.is_track_finished());
        assert_eq!(clock.track_length(), Some(1.0));
    }

    #[test]
    fn test_wall_clock_freezes_on_stop() {
        let mut clock = WallClock::new(0.0);
        clock.start().unwrap();
        clock.stop();
        let frozen = clock.current_elapsed_time();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(clock.current_elapsed_time(), frozen);
        assert!(clock.is_track_finished());
    }
}
