use crate::controller::SetupError;
use crate::store::Entry;
use crate::ui::mvi::Intent;
use crate::ui::setup::state::FieldError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupIntent {
    FetchStarted,
    /// Raw list from the store, template entry included.
    EntriesLoaded { entries: Vec<Entry> },
    /// Fetch failed; entries and form keep their previous contents.
    FetchFailed { error: SetupError },

    StartCreate,
    /// Open `name` for editing. Unknown or template names raise `NotFound`.
    StartEdit { name: String },
    UpdateStanza { value: String },
    /// Set one field; `"stanza"` addresses the stanza name.
    UpdateField { name: String, value: String },
    /// Type into the focused form position.
    InsertChar(char),
    /// Erase the last character of the focused form position.
    DeleteChar,
    /// Flip the focused field between `true` and `false` if it is a bool.
    ToggleFocused,
    FocusNext,
    FocusPrev,
    SelectNext,
    SelectPrev,
    Cancel,

    ValidationFailed { errors: Vec<FieldError> },
    RequestStarted,
    /// Entry persisted; the form closes.
    SubmitSucceeded,
    /// Upsert failed; the form stays open minus the secret.
    SubmitFailed { error: SetupError },
    SetupCompleted,
    RequestSettled,
    RequestFailed { error: SetupError },
    DismissError,
}

impl Intent for SetupIntent {}
