use crate::config::FieldType;
use crate::ui::setup::{SetupIntent, SetupState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the runtime should do with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    /// Pure state change, dispatched straight to the reducer.
    Intent(SetupIntent),
    Refresh,
    Create,
    Edit(String),
    Delete(String),
    Submit,
}

pub fn handle_key(state: &SetupState, key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        return InputAction::Quit;
    }
    if is_ctrl_char(key, 'x') && state.error.is_some() {
        return InputAction::Intent(SetupIntent::DismissError);
    }

    if state.form.is_visible() {
        form_key(state, key)
    } else {
        list_key(state, key)
    }
}

fn form_key(state: &SetupState, key: KeyEvent) -> InputAction {
    if is_ctrl_char(key, 's') {
        return if state.in_flight {
            InputAction::None
        } else {
            InputAction::Submit
        };
    }

    match key.code {
        KeyCode::Esc => InputAction::Intent(SetupIntent::Cancel),
        KeyCode::Tab | KeyCode::Down => InputAction::Intent(SetupIntent::FocusNext),
        KeyCode::BackTab | KeyCode::Up => InputAction::Intent(SetupIntent::FocusPrev),
        KeyCode::Enter if !state.in_flight => InputAction::Submit,
        KeyCode::Backspace => InputAction::Intent(SetupIntent::DeleteChar),
        KeyCode::Char(' ') if focused_is_bool(state) => {
            InputAction::Intent(SetupIntent::ToggleFocused)
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Intent(SetupIntent::InsertChar(ch))
        }
        _ => InputAction::None,
    }
}

fn focused_is_bool(state: &SetupState) -> bool {
    state
        .focused_descriptor()
        .is_some_and(|field| field.field_type == FieldType::Bool)
}

fn list_key(state: &SetupState, key: KeyEvent) -> InputAction {
    let selected = || state.selected_entry().map(|entry| entry.name.clone());

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => InputAction::Quit,
        KeyCode::Down | KeyCode::Char('j') => InputAction::Intent(SetupIntent::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => InputAction::Intent(SetupIntent::SelectPrev),
        KeyCode::Char('r') => InputAction::Refresh,
        KeyCode::Char('n') => InputAction::Create,
        KeyCode::Enter | KeyCode::Char('e') => selected().map_or(InputAction::None, InputAction::Edit),
        KeyCode::Char('d') | KeyCode::Delete if !state.in_flight => {
            selected().map_or(InputAction::None, InputAction::Delete)
        }
        _ => InputAction::None,
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
