use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys the game reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Space,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    Quit,
}

/// Only fresh presses count: held keys and releases are dropped.
pub fn translate(ev: &KeyEvent) -> Option<Input> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(Input::Quit);
    }

    let key = match ev.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(' ') => Key::Space,
        _ => return None,
    };
    Some(Input::Key(key))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev.code, KeyCode::Char('c') | KeyCode::Char('C')) && ev.modifiers.contains(KeyModifiers::CONTROL)
}
