use crate::config::{AppConfig, FieldType};
use crate::controller::SetupError;
use crate::normalize::{normalize_bool, Normalized};
use crate::store::{Entry, FieldValue};
use crate::ui::mvi::Reducer;
use crate::ui::setup::intent::SetupIntent;
use crate::ui::setup::state::{FocusTarget, FormMode, FormState, SetupState, STANZA_FIELD};

pub struct SetupReducer;

impl Reducer for SetupReducer {
    type State = SetupState;
    type Intent = SetupIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SetupIntent::FetchStarted => SetupState {
                fetching: true,
                ..state
            },
            SetupIntent::EntriesLoaded { entries } => entries_loaded(state, entries),
            SetupIntent::FetchFailed { error } => SetupState {
                fetching: false,
                error: Some(error),
                ..state
            },
            SetupIntent::StartCreate => start_create(state),
            SetupIntent::StartEdit { name } => start_edit(state, name),
            SetupIntent::UpdateStanza { value } => update_stanza(state, value),
            SetupIntent::UpdateField { name, value } => {
                if name == STANZA_FIELD {
                    update_stanza(state, value)
                } else {
                    update_field(state, name, value)
                }
            }
            SetupIntent::InsertChar(c) => edit_focused(state, |value| value.push(c)),
            SetupIntent::DeleteChar => edit_focused(state, |value| {
                value.pop();
            }),
            SetupIntent::ToggleFocused => toggle_focused(state),
            SetupIntent::FocusNext => move_focus(state, true),
            SetupIntent::FocusPrev => move_focus(state, false),
            SetupIntent::SelectNext => move_selection(state, true),
            SetupIntent::SelectPrev => move_selection(state, false),
            SetupIntent::Cancel => SetupState {
                form: FormState::blank(&state.config),
                error: None,
                ..state
            },
            SetupIntent::ValidationFailed { errors } => {
                let mut state = state;
                let targets = state.form.targets(&state.config);
                if let Some(first) = errors.first() {
                    if let Some(index) = targets.iter().position(|t| t.key() == first.field) {
                        state.form.focused = index;
                    }
                    state.error = Some(SetupError::Validation {
                        field: first.field.clone(),
                        message: first.message.clone(),
                    });
                }
                state.form.errors = errors;
                state
            }
            SetupIntent::RequestStarted => SetupState {
                in_flight: true,
                error: None,
                ..state
            },
            SetupIntent::SubmitSucceeded => SetupState {
                form: FormState::blank(&state.config),
                ..state
            },
            SetupIntent::SubmitFailed { error } => {
                let mut state = state;
                let secret_field = state.config.secret_field.clone();
                if let Some(secret) = state.form.fields.get_mut(&secret_field) {
                    secret.clear();
                }
                state.in_flight = false;
                state.error = Some(error);
                state
            }
            SetupIntent::SetupCompleted => SetupState {
                first_run: Some(false),
                ..state
            },
            SetupIntent::RequestSettled => SetupState {
                in_flight: false,
                ..state
            },
            SetupIntent::RequestFailed { error } => SetupState {
                in_flight: false,
                error: Some(error),
                ..state
            },
            SetupIntent::DismissError => SetupState {
                error: None,
                ..state
            },
        }
    }
}

/// Split off the template, strip secrets and normalize the disabled flag.
fn entries_loaded(state: SetupState, loaded: Vec<Entry>) -> SetupState {
    let config = state.config.clone();
    let mut default_entry = None;
    let mut entries = Vec::with_capacity(loaded.len());
    let mut unrecognized_flags = Vec::new();

    for mut entry in loaded {
        entry.content.remove(&config.secret_field);
        if let Some(flag) = entry.content.remove(&config.disabled_field) {
            let normalized = normalize_bool(&flag);
            if matches!(normalized, Normalized::Unrecognized(_)) {
                unrecognized_flags.push(entry.name.clone());
            }
            entry
                .content
                .insert(config.disabled_field.clone(), normalized.into_value());
        }

        if entry.is_default() {
            if default_entry.is_none() {
                default_entry = Some(entry);
            }
        } else {
            entries.push(entry);
        }
    }

    let error = match state.error {
        Some(SetupError::Fetch(_)) => None,
        other => other,
    };

    SetupState {
        selected: state.selected.min(entries.len().saturating_sub(1)),
        first_run: state.first_run.or(Some(entries.is_empty())),
        default_entry,
        entries,
        fetching: false,
        error,
        unrecognized_flags,
        ..state
    }
}

/// Value a field starts with: the entry's own value, else the template's,
/// else the descriptor default. The secret always starts blank.
fn seed_fields(config: &AppConfig, sources: &[Option<&Entry>]) -> FormState {
    let mut form = FormState::blank(config);
    for descriptor in &config.fields {
        if config.is_secret(&descriptor.name) {
            continue;
        }
        let value = sources
            .iter()
            .flatten()
            .find_map(|entry| entry.get(&descriptor.name))
            .map(FieldValue::to_form_string)
            .unwrap_or_else(|| descriptor.default_text());
        form.fields.insert(descriptor.name.clone(), value);
    }
    form
}

fn start_create(state: SetupState) -> SetupState {
    let mut form = seed_fields(&state.config, &[state.default_entry.as_ref()]);
    form.mode = FormMode::Creating;
    form.stanza = if state.entries.is_empty() {
        state.config.default_stanza.clone()
    } else {
        String::new()
    };

    SetupState {
        form,
        error: None,
        ..state
    }
}

fn start_edit(state: SetupState, name: String) -> SetupState {
    let Some(entry) = state.find_entry(&name) else {
        return SetupState {
            error: Some(SetupError::NotFound { name }),
            ..state
        };
    };

    let mut form = seed_fields(&state.config, &[Some(entry), state.default_entry.as_ref()]);
    form.mode = FormMode::Editing {
        original: name.clone(),
    };
    form.stanza = name;

    SetupState {
        form,
        error: None,
        ..state
    }
}

fn update_stanza(mut state: SetupState, value: String) -> SetupState {
    if !state.form.is_creating() {
        return state;
    }
    state.form.stanza = value;
    state.form.errors.retain(|error| error.field != STANZA_FIELD);
    state.error = None;
    state
}

fn update_field(mut state: SetupState, name: String, value: String) -> SetupState {
    if !state.form.is_visible() {
        return state;
    }
    let Some(slot) = state.form.fields.get_mut(&name) else {
        return state;
    };
    *slot = value;
    state.form.errors.retain(|error| error.field != name);
    state.error = None;
    state
}

fn edit_focused(state: SetupState, edit: impl FnOnce(&mut String)) -> SetupState {
    match state.form.focused_target(&state.config) {
        Some(FocusTarget::Stanza) => {
            let mut value = state.form.stanza.clone();
            edit(&mut value);
            update_stanza(state, value)
        }
        Some(FocusTarget::Field(name)) => {
            let mut value = state.form.value(&name).to_string();
            edit(&mut value);
            update_field(state, name, value)
        }
        None => state,
    }
}

fn toggle_focused(state: SetupState) -> SetupState {
    let Some(descriptor) = state.focused_descriptor() else {
        return state;
    };
    if descriptor.field_type != FieldType::Bool {
        return state;
    }
    let name = descriptor.name.clone();
    let current = FieldValue::Str(state.form.value(&name).to_string());
    let flipped = (!normalize_bool(&current).is_truthy()).to_string();
    update_field(state, name, flipped)
}

fn move_focus(mut state: SetupState, forward: bool) -> SetupState {
    if !state.form.is_visible() {
        return state;
    }
    let count = state.form.targets(&state.config).len();
    if count == 0 {
        return state;
    }
    let focused = state.form.focused.min(count - 1);
    state.form.focused = if forward {
        (focused + 1) % count
    } else if focused == 0 {
        count - 1
    } else {
        focused - 1
    };
    state
}

fn move_selection(mut state: SetupState, forward: bool) -> SetupState {
    if state.form.is_visible() || state.entries.is_empty() {
        return state;
    }
    let count = state.entries.len();
    let selected = state.selected.min(count - 1);
    state.selected = if forward {
        (selected + 1) % count
    } else if selected == 0 {
        count - 1
    } else {
        selected - 1
    };
    state
}
