use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Phase;

/// What the player asked for with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a game, or play again after a game over
    Start,
    Letter(char),
    /// Leave the current game and go back to the start screen
    Quit,
    /// Leave the program
    Exit,
}

pub fn command_for(key: KeyEvent, phase: Phase) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // ctrl+c always leaves
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Exit);
    }

    match phase {
        Phase::NotStarted => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Start),
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::Exit),
            _ => None,
        },
        Phase::Playing => match key.code {
            // shifted letters count, chords like ctrl+a or alt+h do not
            KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
                Some(Command::Letter(c))
            }
            KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
        Phase::GameOver => match key.code {
            KeyCode::Enter => Some(Command::Start),
            KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
    }
}
