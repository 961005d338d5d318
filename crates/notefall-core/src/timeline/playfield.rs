use serde::{Deserialize, Serialize};

use super::Note;

/// Vertical projection of the note highway.
///
/// Notes fall at a constant speed and cross `judgment_line_y` exactly at
/// their target time. Coordinates grow downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub judgment_line_y: f64,
    /// Pixels per second
    pub fall_speed: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            judgment_line_y: 500.0,
            fall_speed: 400.0,
        }
    }
}

impl Playfield {
    pub fn y_at(&self, target_time: f64, elapsed: f64) -> f64 {
        self.judgment_line_y - (target_time - elapsed) * self.fall_speed
    }

    pub fn note_y(&self, note: &Note, elapsed: f64) -> f64 {
        self.y_at(note.time, elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_on_judgment_line_at_target_time() {
        let field = Playfield::default();
        let note = Note::new(1, 3.0);
        assert_eq!(field.note_y(&note, 3.0), 500.0);
    }

    #[test]
    fn test_note_falls_with_time() {
        let field = Playfield::default();
        let note = Note::new(1, 3.0);
        assert_eq!(field.note_y(&note, 2.0), 100.0);
        assert_eq!(field.note_y(&note, 2.5), 300.0);
        // Past the line once late
        assert_eq!(field.note_y(&note, 3.5), 700.0);
    }

    #[test]
    fn test_custom_speed() {
        let field = Playfield {
            judgment_line_y: 0.0,
            fall_speed: 100.0,
        };
        assert_eq!(field.y_at(10.0, 8.0), -200.0);
    }
}
