//! Note timeline for one session.
//!
//! - **Note**: lane + target time with a one-shot hit flag
//! - **Playfield**: maps `target time - elapsed` to a vertical coordinate
//! - **Timeline**: the session's notes, sorted by time, plus the miss sweep

mod note;
mod playfield;

pub use note::Note;
pub use playfield::Playfield;

use tracing::debug;

use crate::beatmap::NoteEvent;
use crate::game::{BAD_WINDOW, JudgmentTier};

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    notes: Vec<Note>,
    /// Every note before this index is resolved
    sweep_cursor: usize,
}

impl Timeline {
    /// Build a timeline from beatmap events.
    ///
    /// Notes are stably sorted by time so simultaneous notes keep beatmap order.
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = NoteEvent>,
    {
        let mut notes: Vec<Note> = events
            .into_iter()
            .map(|event| Note::new(event.lane, event.time))
            .collect();
        notes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            notes,
            sweep_cursor: 0,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn unresolved(&self) -> impl Iterator<Item = (usize, &Note)> {
        self.notes
            .iter()
            .enumerate()
            .filter(|(_, note)| !note.is_hit())
    }

    pub fn resolved_count(&self) -> usize {
        self.notes.iter().filter(|note| note.is_hit()).count()
    }

    /// Closest unresolved note in `lane`, as `(index, distance)`.
    ///
    /// Equal distances keep the first note in scan order.
    pub fn nearest_unresolved(&self, lane: usize, elapsed: f64) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (index, note) in self.unresolved() {
            if note.lane != lane {
                continue;
            }
            let distance = note.distance(elapsed);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((index, distance)),
            }
        }
        best
    }

    /// Resolve a note with the given tier. Returns `false` if it was already hit
    /// or the index is out of range.
    pub(crate) fn resolve(&mut self, index: usize, tier: JudgmentTier) -> bool {
        self.notes
            .get_mut(index)
            .is_some_and(|note| note.resolve(tier))
    }

    /// Mark every overdue note as Miss.
    ///
    /// A note is overdue once `time < elapsed - BAD_WINDOW`. Returns the
    /// indices swept by this call; notes already resolved are never reported.
    pub fn sweep_misses(&mut self, elapsed: f64) -> Vec<usize> {
        let threshold = elapsed - BAD_WINDOW;
        let mut swept = Vec::new();

        for index in self.sweep_cursor..self.notes.len() {
            let note = &mut self.notes[index];
            if note.time >= threshold {
                break;
            }
            if note.resolve(JudgmentTier::Miss) {
                debug!("Missed note {} (lane {}, {:.3}s)", index, note.lane, note.time);
                swept.push(index);
            }
        }

        while self
            .notes
            .get(self.sweep_cursor)
            .is_some_and(|note| note.is_hit())
        {
            self.sweep_cursor += 1;
        }

        swept
    }
}
