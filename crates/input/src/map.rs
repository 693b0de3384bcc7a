//! Key mapping from terminal events to session commands.

use crate::types::{DebugCommand, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCommand {
    Game(GameAction),
    Start,
    TogglePause,
    Reset,
    ToggleDebug,
    Debug(DebugCommand),
}

/// Map keyboard input to a session command.
///
/// Ctrl-modified keys are left to [`should_quit`] and otherwise ignored.
pub fn handle_key_event(key: KeyEvent) -> Option<InputCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let action = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            GameAction::MoveLeft
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameAction::MoveRight
        }
        // Down moves toward the lock edge, which is the top of the screen.
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            GameAction::MoveTowardLock
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => GameAction::Rotate,

        KeyCode::Char(' ') => GameAction::HardDrop,

        // Lifecycle
        KeyCode::Enter => return Some(InputCommand::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => return Some(InputCommand::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => return Some(InputCommand::Reset),

        // Debug
        KeyCode::F(1) | KeyCode::Char('`') => return Some(InputCommand::ToggleDebug),
        KeyCode::Char('f') | KeyCode::Char('F') => {
            return Some(InputCommand::Debug(DebugCommand::FillTestRows))
        }
        KeyCode::Char('g') | KeyCode::Char('G') => {
            return Some(InputCommand::Debug(DebugCommand::FillRandomPattern))
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            return Some(InputCommand::Debug(DebugCommand::TriggerLineClear))
        }

        _ => return None,
    };
    Some(InputCommand::Game(action))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
