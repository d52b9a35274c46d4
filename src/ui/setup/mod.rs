//! Setup panel: entry list plus the create/edit form.

mod intent;
mod reducer;
mod state;
mod table;
mod validation;

pub use intent::SetupIntent;
pub use reducer::SetupReducer;
pub use state::{
    FieldError, FocusTarget, FormMode, FormState, SetupState, EMPTY_MESSAGE, FETCHING_MESSAGE,
    STANZA_FIELD,
};
pub use table::{EntriesTable, EntryRow, EntryStatus, ACTIONS_CELL};
pub use validation::{validate_form, Submission};
