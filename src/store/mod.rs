//! Configuration entry store: the collaborator behind the setup panel.
//!
//! The panel only talks to the [`EntryStore`] trait. [`RestEntryStore`]
//! speaks the management REST API; [`MemoryStore`] keeps everything in
//! process for tests and offline use.

mod entry;
mod error;
mod memory;
mod rest;

use async_trait::async_trait;

pub use entry::{Entry, FieldValue, Properties, DEFAULT_ENTRY_NAME};
pub use error::{StoreError, GENERIC_ERROR_TEXT, UNPARSEABLE_ERROR_MESSAGE};
pub use memory::{MemoryStore, StoreCall, StoreOp};
pub use rest::RestEntryStore;

/// Operations the setup panel needs from a configuration collection.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries in store order, including the `default` template.
    async fn list(&self) -> Result<Vec<Entry>, StoreError>;

    /// Create or update the entry `name` with the given properties.
    async fn upsert(&self, name: &str, properties: &Properties) -> Result<Entry, StoreError>;

    async fn delete(&self, name: &str) -> Result<(), StoreError>;

    /// Mark the add-on as configured.
    async fn complete_setup(&self) -> Result<(), StoreError>;

    /// Ask the host to reload the named app.
    async fn reload_app(&self, app_name: &str) -> Result<(), StoreError>;
}
