//! Keyboard-to-command mapping.
//!
//! The rest of the application stays agnostic about concrete key bindings
//! and the specifics of `crossterm` events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use game_core::Direction;

/// High-level outcome of processing a keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Start a new session.
    Restart,
    /// Step or strike toward a cell.
    Hero(Direction),
    /// No meaningful command was produced.
    None,
}

/// Converts a raw key event into a higher-level command.
///
/// North is up the corridor, so the up arrow and `w` move the hero forward.
pub fn handle_key(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => {
            KeyAction::Hero(Direction::NORTH)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => {
            KeyAction::Hero(Direction::SOUTH)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => {
            KeyAction::Hero(Direction::WEST)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => {
            KeyAction::Hero(Direction::EAST)
        }
        KeyCode::Char('r') => KeyAction::Restart,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
