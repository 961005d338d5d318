//! Fixed-tempo fallback generator.

use rand::Rng;

use super::NoteEvent;
use super::analysis::{INTRO_SKIP, KEEP_PROBABILITY, OUTRO_MARGIN};
use crate::game::LANE_COUNT;

pub const FALLBACK_BPM: f64 = 120.0;

/// One note per step in a random lane, from [`INTRO_SKIP`] until
/// [`OUTRO_MARGIN`] before the end.
///
/// Steps are a full beat with probability [`KEEP_PROBABILITY`] and half a
/// beat otherwise.
pub fn fixed_tempo_notes<R: Rng + ?Sized>(track_length: f64, rng: &mut R) -> Vec<NoteEvent> {
    let beat_interval = 60.0 / FALLBACK_BPM;
    let mut notes = Vec::new();
    let mut time = INTRO_SKIP;

    while time < track_length - OUTRO_MARGIN {
        let lane = rng.random_range(0..LANE_COUNT);
        notes.push(NoteEvent::new(lane, time));
        if rng.random_bool(KEEP_PROBABILITY) {
            time += beat_interval;
        } else {
            time += beat_interval / 2.0;
        }
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let notes = fixed_tempo_notes(30.0, &mut rng);
        assert_eq!(notes[0].time, 2.0);
        assert!(notes.iter().all(|n| n.time < 29.0));
        assert!(notes.iter().all(|n| n.lane < LANE_COUNT));
    }

    #[test]
    fn test_steps_are_beats_or_half_beats() {
        let mut rng = StdRng::seed_from_u64(11);
        let notes = fixed_tempo_notes(120.0, &mut rng);
        let mut full = 0;
        let mut half = 0;
        for pair in notes.windows(2) {
            let step = pair[1].time - pair[0].time;
            if (step - 0.5).abs() < 1e-9 {
                full += 1;
            } else if (step - 0.25).abs() < 1e-9 {
                half += 1;
            } else {
                panic!("unexpected step {}", step);
            }
        }
        assert!(full > half);
    }

    #[test]
    fn test_non_empty_above_three_seconds() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(!fixed_tempo_notes(3.01, &mut rng).is_empty());
        }
        let mut rng = StdRng::seed_from_u64(0);
        assert!(fixed_tempo_notes(3.0, &mut rng).is_empty());
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = fixed_tempo_notes(60.0, &mut StdRng::seed_from_u64(8));
        let b = fixed_tempo_notes(60.0, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
    }
}
