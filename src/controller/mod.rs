//! Async orchestration of the setup panel.
//!
//! [`SetupController`] owns the panel state and the store. Every state change
//! goes through [`SetupReducer`]; the controller only decides which intents
//! to dispatch around each store call. Calls are serialized: `&mut self`
//! rules out overlap within one task, and the in-flight flag rejects a new
//! submit or delete while a previous one has not settled.

mod error;

use std::sync::Arc;

use tokio::sync::watch;

pub use error::SetupError;

use crate::config::AppConfig;
use crate::store::{Entry, EntryStore};
use crate::ui::mvi::Reducer;
use crate::ui::setup::{validate_form, SetupIntent, SetupReducer, SetupState};

pub struct SetupController<S> {
    store: S,
    state: SetupState,
    updates: watch::Sender<SetupState>,
}

impl<S: EntryStore> SetupController<S> {
    pub fn new(config: Arc<AppConfig>, store: S) -> Self {
        let state = SetupState::new(config);
        let (updates, _) = watch::channel(state.placeholder());
        Self {
            store,
            state,
            updates,
        }
    }

    pub fn state(&self) -> &SetupState {
        &self.state
    }

    /// Follow state changes, including the ones made while a store call is
    /// still pending. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<SetupState> {
        self.updates.send_replace(self.state.clone());
        self.updates.subscribe()
    }

    /// Apply one intent to the state.
    pub fn dispatch(&mut self, intent: SetupIntent) {
        let placeholder = self.state.placeholder();
        let state = std::mem::replace(&mut self.state, placeholder);
        self.state = SetupReducer::reduce(state, intent);

        if self.updates.receiver_count() > 0 {
            self.updates.send_replace(self.state.clone());
        }
    }

    /// Fetch all entries and return the template plus the user entries.
    ///
    /// On failure the previous entries stay in place and the error is shown.
    pub async fn load_entries(&mut self) -> Result<(Option<Entry>, Vec<Entry>), SetupError> {
        self.dispatch(SetupIntent::FetchStarted);

        match self.store.list().await {
            Ok(entries) => {
                self.dispatch(SetupIntent::EntriesLoaded { entries });
                tracing::debug!(
                    entries = self.state.entries.len(),
                    has_default = self.state.default_entry.is_some(),
                    "configuration entries loaded"
                );
                for name in &self.state.unrecognized_flags {
                    tracing::warn!(
                        stanza = %name,
                        field = %self.state.config.disabled_field,
                        "unrecognized boolean value, treating as set"
                    );
                }
                Ok((self.state.default_entry.clone(), self.state.entries.clone()))
            }
            Err(err) => {
                let error = SetupError::Fetch(err.resolve_message());
                tracing::error!(error = %err, "failed to fetch configuration entries");
                self.dispatch(SetupIntent::FetchFailed {
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    /// Open the form for a new entry.
    pub fn start_create(&mut self) {
        self.dispatch(SetupIntent::StartCreate);
    }

    /// Open the form for an existing user entry. The secret starts blank.
    pub fn start_edit(&mut self, name: &str) -> Result<(), SetupError> {
        self.dispatch(SetupIntent::StartEdit {
            name: name.to_string(),
        });
        match &self.state.error {
            Some(error @ SetupError::NotFound { .. }) => Err(error.clone()),
            _ => Ok(()),
        }
    }

    /// Set a form field; `"stanza"` sets the entry name while creating.
    pub fn update_field(&mut self, name: &str, value: &str) {
        self.dispatch(SetupIntent::UpdateField {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    pub fn cancel(&mut self) {
        self.dispatch(SetupIntent::Cancel);
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(SetupIntent::DismissError);
    }

    /// Validate and save the open form, then refresh the list.
    ///
    /// The first submission after an empty initial load also marks the
    /// add-on configured and reloads it. If that sequence fails the entry
    /// stays saved and [`SetupError::SetupIncomplete`] is returned.
    pub async fn submit(&mut self) -> Result<(), SetupError> {
        if self.state.in_flight {
            return Err(SetupError::Busy);
        }

        let submission = match validate_form(&self.state) {
            Ok(submission) => submission,
            Err(errors) => {
                self.dispatch(SetupIntent::ValidationFailed { errors });
                return Err(self.state.error.clone().unwrap_or(SetupError::Validation {
                    field: String::new(),
                    message: "Invalid form".to_string(),
                }));
            }
        };

        let first_run = self.state.is_first_run();
        tracing::info!(stanza = %submission.stanza, first_run, "saving configuration entry");
        self.dispatch(SetupIntent::RequestStarted);

        if let Err(err) = self
            .store
            .upsert(&submission.stanza, &submission.properties)
            .await
        {
            let error = SetupError::Submit(err.resolve_message());
            tracing::error!(stanza = %submission.stanza, error = %err, "failed to save configuration entry");
            self.dispatch(SetupIntent::SubmitFailed {
                error: error.clone(),
            });
            return Err(error);
        }

        self.dispatch(SetupIntent::SubmitSucceeded);

        let completion = if first_run {
            self.complete_first_run(&submission.stanza).await
        } else {
            Ok(())
        };
        self.dispatch(SetupIntent::RequestSettled);

        let refreshed = self.load_entries().await;

        if let Err(error) = completion {
            self.dispatch(SetupIntent::RequestFailed {
                error: error.clone(),
            });
            return Err(error);
        }
        refreshed.map(|_| ())
    }

    async fn complete_first_run(&mut self, stanza: &str) -> Result<(), SetupError> {
        let app_name = self.state.config.name.clone();
        tracing::info!(app = %app_name, "completing setup and reloading app");

        let result = match self.store.complete_setup().await {
            Ok(()) => self.store.reload_app(&app_name).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                self.dispatch(SetupIntent::SetupCompleted);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    app = %app_name,
                    stanza,
                    error = %err,
                    "entry saved but setup completion failed"
                );
                Err(SetupError::SetupIncomplete {
                    stanza: stanza.to_string(),
                    message: err.resolve_message(),
                })
            }
        }
    }

    /// Delete a user entry, then refresh the list.
    pub async fn delete_entry(&mut self, name: &str) -> Result<(), SetupError> {
        if self.state.in_flight {
            return Err(SetupError::Busy);
        }

        if self.state.find_entry(name).is_none() {
            let error = SetupError::NotFound {
                name: name.to_string(),
            };
            self.dispatch(SetupIntent::RequestFailed {
                error: error.clone(),
            });
            return Err(error);
        }

        self.dispatch(SetupIntent::RequestStarted);
        if let Err(err) = self.store.delete(name).await {
            let error = SetupError::Delete(err.resolve_message());
            tracing::error!(stanza = %name, error = %err, "failed to delete configuration entry");
            self.dispatch(SetupIntent::RequestFailed {
                error: error.clone(),
            });
            return Err(error);
        }

        tracing::info!(stanza = %name, "configuration entry deleted");
        self.dispatch(SetupIntent::RequestSettled);
        self.load_entries().await.map(|_| ())
    }
}
