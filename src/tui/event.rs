use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;

/// Result of handling a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Submit,
    Continue,
}

/// Handle a key press. Returns an action indicating what the event loop should do.
pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    if app.add_form.is_some() {
        return handle_add(app, key);
    }
    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc
        ) {
            app.toggle_help();
        }
        return KeyAction::Continue;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyAction::Quit
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_selected(),
        KeyCode::Enter => app.toggle_detail(),
        KeyCode::Char('a') | KeyCode::Char('+') => app.enter_add_mode(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_add(app: &mut App, key: KeyEvent) -> KeyAction {
    let Some(form) = app.add_form.as_mut() else {
        return KeyAction::Continue;
    };
    match key.code {
        KeyCode::Esc => app.cancel_add_mode(),
        KeyCode::Enter => return KeyAction::Submit,
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Right => form.increment(),
        KeyCode::Left => form.decrement(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => form.clear_field(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => form.insert_char(c),
        _ => {}
    }
    KeyAction::Continue
}
