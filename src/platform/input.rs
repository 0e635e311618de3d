//! Keyboard input
//!
//! Terminals differ in what they report. With keyboard enhancement we get
//! proper press/repeat/release events; classic terminals only send presses
//! (auto-repeat arrives as repeated presses). A key therefore counts as held
//! while its last press or repeat is at most `HOLD_WINDOW` frames old, and
//! is dropped immediately on an explicit release.
//!
//! The tracker turns that into clean `Pressed`/`Released` transitions for the
//! game.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Frames a key stays held after its last press/repeat
pub const HOLD_WINDOW: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
}

/// Key binding
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Tracks which movement actions are held, frame by frame
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Frame each action was last pressed or repeated
    last_seen: HashMap<Action, u64>,
    /// Actions reported as pressed to the game
    held: Vec<Action>,
    quit: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event seen during `frame`
    pub fn record(&mut self, event: &KeyEvent, frame: u64) {
        let Some(action) = map_key(event.code, event.modifiers) else {
            return;
        };
        match (action, event.kind) {
            (Action::Quit, KeyEventKind::Press) => self.quit = true,
            (Action::Quit, _) => {}
            (_, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.last_seen.insert(action, frame);
            }
            (_, KeyEventKind::Release) => {
                self.last_seen.remove(&action);
            }
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn is_held(&self, action: Action, frame: u64) -> bool {
        self.last_seen
            .get(&action)
            .is_some_and(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    /// Press/release transitions since the previous call
    pub fn transitions(&mut self, frame: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for action in [Action::MoveLeft, Action::MoveRight] {
            let now = self.is_held(action, frame);
            let before = self.held.contains(&action);
            if now && !before {
                self.held.push(action);
                events.push(InputEvent::Pressed(action));
            } else if !now && before {
                self.held.retain(|a| *a != action);
                events.push(InputEvent::Released(action));
            }
        }
        events
    }
}
