//! View model of the entries table, independent of any renderer.

use crate::config::AppConfig;
use crate::normalize::normalize_bool;
use crate::store::{Entry, FieldValue};

pub const NAME_HEADER: &str = "Name";
pub const ACTIONS_HEADER: &str = "Actions";
pub const STATUS_HEADER: &str = "Status";
pub const ACTIONS_CELL: &str = "Edit | Delete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Enabled,
    Disabled,
}

impl EntryStatus {
    /// Derived from the disabled flag: set means disabled, unset or absent
    /// means enabled. Unrecognized values count by loose truthiness.
    pub fn from_flag(flag: Option<&FieldValue>) -> Self {
        match flag {
            Some(value) if normalize_bool(value).is_truthy() => EntryStatus::Disabled,
            _ => EntryStatus::Enabled,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryStatus::Enabled => "enabled",
            EntryStatus::Disabled => "disabled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub name: String,
    /// One cell per header, name first, status last.
    pub cells: Vec<String>,
    pub status: EntryStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntriesTable {
    pub headers: Vec<String>,
    pub rows: Vec<EntryRow>,
}

impl EntriesTable {
    /// Rows follow `entries` order; the template entry never becomes a row.
    pub fn build(config: &AppConfig, entries: &[Entry]) -> Self {
        let columns: Vec<_> = config.table_fields().collect();

        let headers = std::iter::once(NAME_HEADER.to_string())
            .chain(columns.iter().map(|field| field.label.clone()))
            .chain([ACTIONS_HEADER.to_string(), STATUS_HEADER.to_string()])
            .collect();

        let rows = entries
            .iter()
            .filter(|entry| !entry.is_default())
            .map(|entry| {
                let status = EntryStatus::from_flag(entry.get(&config.disabled_field));
                let cells = std::iter::once(entry.name.clone())
                    .chain(columns.iter().map(|field| {
                        entry
                            .get(&field.name)
                            .map(FieldValue::to_form_string)
                            .unwrap_or_default()
                    }))
                    .chain([ACTIONS_CELL.to_string(), status.label().to_string()])
                    .collect();
                EntryRow {
                    name: entry.name.clone(),
                    cells,
                    status,
                }
            })
            .collect();

        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
