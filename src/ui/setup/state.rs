use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{AppConfig, FieldDescriptor};
use crate::controller::SetupError;
use crate::store::Entry;
use crate::ui::mvi::UiState;
use crate::ui::setup::table::EntriesTable;

pub const FETCHING_MESSAGE: &str = "Fetching configuration entries...";
pub const EMPTY_MESSAGE: &str = "No configuration entries found. Add one to get started.";

/// Name used for the stanza in field errors and focus targets.
pub const STANZA_FIELD: &str = "stanza";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Hidden,
    Creating,
    /// Editing the entry that was named `original` when the form opened.
    Editing { original: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// One focusable position of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Stanza,
    Field(String),
}

impl FocusTarget {
    pub fn key(&self) -> &str {
        match self {
            FocusTarget::Stanza => STANZA_FIELD,
            FocusTarget::Field(name) => name,
        }
    }
}

/// Editable copy of one entry.
///
/// `fields` always holds exactly the configured field names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub mode: FormMode,
    pub stanza: String,
    pub fields: BTreeMap<String, String>,
    pub focused: usize,
    pub errors: Vec<FieldError>,
}

impl FormState {
    /// Hidden form with every configured field present and empty.
    pub fn blank(config: &AppConfig) -> Self {
        Self {
            fields: config
                .field_names()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.mode, FormMode::Hidden)
    }

    pub fn is_creating(&self) -> bool {
        matches!(self.mode, FormMode::Creating)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing { .. })
    }

    pub fn value(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// Focus order: the stanza (only while creating), then every field.
    pub fn targets(&self, config: &AppConfig) -> Vec<FocusTarget> {
        let stanza = self.is_creating().then_some(FocusTarget::Stanza);
        stanza
            .into_iter()
            .chain(
                config
                    .fields
                    .iter()
                    .map(|field| FocusTarget::Field(field.name.clone())),
            )
            .collect()
    }

    pub fn focused_target(&self, config: &AppConfig) -> Option<FocusTarget> {
        self.targets(config).into_iter().nth(self.focused)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetupState {
    pub config: Arc<AppConfig>,
    /// Template entry, secret stripped.
    pub default_entry: Option<Entry>,
    /// User entries in store order, secrets stripped.
    pub entries: Vec<Entry>,
    pub form: FormState,
    /// Selected row of the entries table.
    pub selected: usize,
    pub fetching: bool,
    pub in_flight: bool,
    /// Whether no user entry existed at the first successful load and the
    /// completion sequence has not yet succeeded. `None` until a load succeeds.
    pub first_run: Option<bool>,
    /// Dismissible banner.
    pub error: Option<SetupError>,
    /// Entries whose disabled flag was not a recognized boolean at last load.
    pub unrecognized_flags: Vec<String>,
}

impl UiState for SetupState {}

impl Default for SetupState {
    fn default() -> Self {
        Self::new(Arc::new(AppConfig::default()))
    }
}

impl SetupState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            form: FormState::blank(&config),
            config,
            default_entry: None,
            entries: Vec::new(),
            selected: 0,
            fetching: true,
            in_flight: false,
            first_run: None,
            error: None,
            unrecognized_flags: Vec::new(),
        }
    }

    /// Empty state sharing this state's config. Builds no field map.
    pub(crate) fn placeholder(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            default_entry: None,
            entries: Vec::new(),
            form: FormState::default(),
            selected: 0,
            fetching: false,
            in_flight: false,
            first_run: None,
            error: None,
            unrecognized_flags: Vec::new(),
        }
    }

    /// A submission now would be the first one. Unknown counts as first.
    pub fn is_first_run(&self) -> bool {
        self.first_run.unwrap_or(true)
    }

    /// Look up a user entry. The template entry is never returned.
    pub fn find_entry(&self, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name && !entry.is_default())
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    pub fn focused_descriptor(&self) -> Option<&FieldDescriptor> {
        match self.form.focused_target(&self.config)? {
            FocusTarget::Stanza => None,
            FocusTarget::Field(name) => self.config.field(&name),
        }
    }

    /// Message shown instead of the table, if any.
    pub fn list_placeholder(&self) -> Option<&'static str> {
        if self.fetching {
            Some(FETCHING_MESSAGE)
        } else if self.entries.is_empty() {
            Some(EMPTY_MESSAGE)
        } else {
            None
        }
    }

    pub fn table(&self) -> EntriesTable {
        EntriesTable::build(&self.config, &self.entries)
    }
}
