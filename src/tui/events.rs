use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode, MouseButton,
    MouseEvent, MouseEventKind,
};

/// User actions from terminal events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Ctrl+C: close without navigating
    Quit,
    /// Esc: clear the input, or close when it is already empty
    Escape,
    MoveUp,
    MoveDown,
    /// Enter; `control` is set when Ctrl was part of the key chord
    Submit { control: bool },
    /// A bare Ctrl key went down (needs keyboard enhancement support)
    ControlDown,
    ControlUp,
    InsertChar(char),
    DeleteChar,
    ClearInput,
    CopyUrl,
    Click { column: u16, row: u16, control: bool },
    None,
}

/// Poll for terminal events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)? {
        return Ok(match event::read()? {
            Event::Key(key) => key_to_action(key),
            Event::Mouse(mouse) => mouse_to_action(mouse),
            _ => Action::None,
        });
    }
    Ok(Action::None)
}

fn is_control_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Modifier(ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl)
    )
}

fn key_to_action(key: KeyEvent) -> Action {
    if is_control_key(key.code) {
        return match key.kind {
            KeyEventKind::Release => Action::ControlUp,
            KeyEventKind::Press | KeyEventKind::Repeat => Action::ControlDown,
        };
    }

    // Releases of ordinary keys only arrive with enhancement flags on
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if control => Action::Quit,
        KeyCode::Char('y') if control => Action::CopyUrl,
        KeyCode::Char('u') if control => Action::ClearInput,
        KeyCode::Char('p') if control => Action::MoveUp,
        KeyCode::Char('n') if control => Action::MoveDown,
        // Terminals without enhancement report Ctrl+Enter as Ctrl+J
        KeyCode::Char('j') if control => Action::Submit { control: true },
        KeyCode::Esc => Action::Escape,
        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Enter => Action::Submit { control },
        KeyCode::Backspace => Action::DeleteChar,
        KeyCode::Char(c) if !control && !key.modifiers.contains(KeyModifiers::ALT) => {
            Action::InsertChar(c)
        }
        _ => Action::None,
    }
}

fn mouse_to_action(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::Click {
            column: mouse.column,
            row: mouse.row,
            control: mouse.modifiers.contains(KeyModifiers::CONTROL),
        },
        MouseEventKind::ScrollUp => Action::MoveUp,
        MouseEventKind::ScrollDown => Action::MoveDown,
        _ => Action::None,
    }
}
