use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use notefall_core::KeyBindings;
use tracing::debug;

use crate::pacer::FramePacer;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Lane(usize),
    /// Space on the title screen
    Start,
    /// Esc: abort while playing, quit otherwise
    Back,
    /// R on the result screen
    Replay,
    Quit,
}

/// Spawn a thread that turns key presses into [`InputAction`]s.
///
/// The thread stops when the pacer is stopped or the receiver is dropped.
pub fn spawn_keyboard_reader(
    pacer: Arc<FramePacer>,
    keys: KeyBindings,
    tx: Sender<InputAction>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        debug!("Keyboard reader started");

        while !pacer.is_stopped() {
            // Poll with a timeout so a stop is noticed
            if event::poll(Duration::from_millis(10)).unwrap_or(false)
                && let Ok(Event::Key(key_event)) = event::read()
                && let Some(action) = map_key(&key_event, &keys)
            {
                debug!("Key {:?} -> {:?}", key_event.code, action);
                if tx.send(action).is_err() {
                    break;
                }
            }
        }

        debug!("Keyboard reader stopped");
    })
}

/// Map a key event to an action. Releases and repeats are ignored.
pub fn map_key(event: &KeyEvent, keys: &KeyBindings) -> Option<InputAction> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    match event.code {
        // Raw mode swallows SIGINT
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputAction::Quit)
        }
        KeyCode::Esc => Some(InputAction::Back),
        KeyCode::Char(c) => {
            if let Some(lane) = keys.lane_for(c) {
                Some(InputAction::Lane(lane))
            } else {
                match c {
                    ' ' => Some(InputAction::Start),
                    'r' | 'R' => Some(InputAction::Replay),
                    'q' | 'Q' => Some(InputAction::Quit),
                    _ => None,
                }
            }
        }
        _ => None,
    }
}
