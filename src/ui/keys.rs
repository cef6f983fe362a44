use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Input;

/// Maps a key press to a picker input. Releases, repeats on some platforms,
/// and unbound keys give `None`.
pub fn input_for(key: KeyEvent) -> Option<Input> {
    // crossterm also emits release and repeat events on Windows
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Input::Cancel),
            KeyCode::Char('p') => Some(Input::MoveUp),
            KeyCode::Char('n') => Some(Input::MoveDown),
            KeyCode::Char('a') => Some(Input::CaretHome),
            KeyCode::Char('e') => Some(Input::CaretEnd),
            KeyCode::Char('u') => Some(Input::ClearQuery),
            KeyCode::Char('w') | KeyCode::Backspace => Some(Input::DeleteWord),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(Input::Accept),
        KeyCode::Esc => Some(Input::Cancel),
        KeyCode::Up => Some(Input::MoveUp),
        KeyCode::Down => Some(Input::MoveDown),
        KeyCode::Left => Some(Input::CaretLeft),
        KeyCode::Right => Some(Input::CaretRight),
        KeyCode::Home => Some(Input::CaretHome),
        KeyCode::End => Some(Input::CaretEnd),
        KeyCode::Backspace => Some(Input::Backspace),
        KeyCode::Delete => Some(Input::Delete),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => Some(Input::Insert(c)),
        _ => None,
    }
}
