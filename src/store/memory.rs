//! In-process [`EntryStore`] with call recording and failure injection.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::entry::{Entry, FieldValue, Properties};
use super::error::StoreError;
use super::EntryStore;

/// Store operation, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    List,
    Upsert,
    Delete,
    CompleteSetup,
    ReloadApp,
}

/// A recorded call, in the order it reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Upsert { name: String, properties: Properties },
    Delete { name: String },
    CompleteSetup,
    ReloadApp { app_name: String },
}

impl StoreCall {
    pub fn op(&self) -> StoreOp {
        match self {
            StoreCall::List => StoreOp::List,
            StoreCall::Upsert { .. } => StoreOp::Upsert,
            StoreCall::Delete { .. } => StoreOp::Delete,
            StoreCall::CompleteSetup => StoreOp::CompleteSetup,
            StoreCall::ReloadApp { .. } => StoreOp::ReloadApp,
        }
    }
}

#[derive(Default)]
struct MemoryStoreInner {
    entries: Vec<Entry>,
    configured: bool,
    reloads: Vec<String>,
    calls: Vec<StoreCall>,
    failures: HashMap<StoreOp, VecDeque<StoreError>>,
}

/// Ordered in-memory configuration collection.
///
/// Clones share the same underlying collection, so a test can hand one
/// clone to the controller and inspect the other.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries` in the given order.
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let store = Self::new();
        store.inner.lock().entries = entries;
        store
    }

    /// Make the next call of `op` fail with `error`. Failures queue up.
    pub fn fail_next(&self, op: StoreOp, error: StoreError) {
        self.inner
            .lock()
            .failures
            .entry(op)
            .or_default()
            .push_back(error);
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.inner.lock().entries.clone()
    }

    pub fn entry(&self, name: &str) -> Option<Entry> {
        self.inner
            .lock()
            .entries
            .iter()
            .find(|entry| entry.name == name)
            .cloned()
    }

    pub fn is_configured(&self) -> bool {
        self.inner.lock().configured
    }

    pub fn reloads(&self) -> Vec<String> {
        self.inner.lock().reloads.clone()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of recorded calls of one kind.
    pub fn call_count(&self, op: StoreOp) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|call| call.op() == op)
            .count()
    }

    /// Record the call and pop an injected failure, if any.
    fn begin(&self, call: StoreCall) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let op = call.op();
        inner.calls.push(call);
        match inner.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        self.begin(StoreCall::List)?;
        Ok(self.entries())
    }

    async fn upsert(&self, name: &str, properties: &Properties) -> Result<Entry, StoreError> {
        self.begin(StoreCall::Upsert {
            name: name.to_string(),
            properties: properties.clone(),
        })?;

        if name.trim().is_empty() {
            return Err(StoreError::Message(
                "Stanza name must not be empty".to_string(),
            ));
        }

        let mut inner = self.inner.lock();
        let index = match inner.entries.iter().position(|entry| entry.name == name) {
            Some(index) => index,
            None => {
                inner.entries.push(Entry::new(name));
                inner.entries.len() - 1
            }
        };
        let entry = &mut inner.entries[index];
        for (field, value) in properties {
            entry
                .content
                .insert(field.clone(), FieldValue::Str(value.clone()));
        }
        Ok(entry.clone())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.begin(StoreCall::Delete {
            name: name.to_string(),
        })?;

        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|entry| entry.name != name);
        if inner.entries.len() == before {
            return Err(StoreError::Message(format!(
                "Could not find object id={name}"
            )));
        }
        Ok(())
    }

    async fn complete_setup(&self) -> Result<(), StoreError> {
        self.begin(StoreCall::CompleteSetup)?;
        self.inner.lock().configured = true;
        Ok(())
    }

    async fn reload_app(&self, app_name: &str) -> Result<(), StoreError> {
        self.begin(StoreCall::ReloadApp {
            app_name: app_name.to_string(),
        })?;
        self.inner.lock().reloads.push(app_name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Properties {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn upsert_appends_new_entries_in_order() {
        let store = MemoryStore::new();
        store.upsert("b", &props(&[("url", "https://b")])).await.unwrap();
        store.upsert("a", &props(&[("url", "https://a")])).await.unwrap();

        let names: Vec<_> = store.list().await.unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn upsert_merges_into_existing_entry() {
        let store = MemoryStore::with_entries(vec![Entry::new("prod")
            .with("url", "https://old")
            .with("username", "jdoe")]);

        let entry = store
            .upsert("prod", &props(&[("url", "https://new")]))
            .await
            .unwrap();

        assert_eq!(entry.get("url"), Some(&FieldValue::from("https://new")));
        assert_eq!(entry.get("username"), Some(&FieldValue::from("jdoe")));
        assert_eq!(store.entries().len(), 1);
    }

    #[tokio::test]
    async fn injected_failure_is_one_shot() {
        let store = MemoryStore::new();
        store.fail_next(StoreOp::List, StoreError::Message("down".to_string()));

        assert!(store.list().await.is_err());
        assert!(store.list().await.is_ok());
        assert_eq!(store.call_count(StoreOp::List), 2);
    }

    #[tokio::test]
    async fn delete_missing_entry_fails() {
        let store = MemoryStore::new();
        let err = store.delete("ghost").await.unwrap_err();
        assert_eq!(err.resolve_message(), "Could not find object id=ghost");
    }

    #[tokio::test]
    async fn completion_calls_are_recorded() {
        let store = MemoryStore::new();
        store.complete_setup().await.unwrap();
        store.reload_app("TA-quolab").await.unwrap();

        assert!(store.is_configured());
        assert_eq!(store.reloads(), vec!["TA-quolab".to_string()]);
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::CompleteSetup,
                StoreCall::ReloadApp {
                    app_name: "TA-quolab".to_string()
                }
            ]
        );
    }
}
