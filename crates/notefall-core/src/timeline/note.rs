use serde::Serialize;

use crate::game::JudgmentTier;

/// A scheduled lane + time event the player has to match.
///
/// `hit` flips from `false` to `true` at most once. After that the note is
/// frozen for the rest of the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub lane: usize,
    /// Target time in seconds since playback start
    pub time: f64,
    hit: bool,
    judgment: Option<JudgmentTier>,
}

impl Note {
    pub fn new(lane: usize, time: f64) -> Self {
        Self {
            lane,
            time,
            hit: false,
            judgment: None,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    pub fn judgment(&self) -> Option<JudgmentTier> {
        self.judgment
    }

    /// Absolute timing distance to an input at `elapsed`
    pub fn distance(&self, elapsed: f64) -> f64 {
        (self.time - elapsed).abs()
    }

    /// Mark the note resolved. Returns `false` if it already was.
    pub(crate) fn resolve(&mut self, tier: JudgmentTier) -> bool {
        if self.hit {
            return false;
        }
        self.hit = true;
        self.judgment = Some(tier);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_once() {
        let mut note = Note::new(2, 4.0);
        assert!(!note.is_hit());
        assert!(note.resolve(JudgmentTier::Great));
        assert!(!note.resolve(JudgmentTier::Miss));
        assert!(note.is_hit());
        assert_eq!(note.judgment(), Some(JudgmentTier::Great));
    }

    #[test]
    fn test_distance_is_symmetric() {
        let note = Note::new(0, 3.0);
        assert!((note.distance(2.9) - 0.1).abs() < 1e-9);
        assert!((note.distance(3.1) - 0.1).abs() < 1e-9);
    }
}
