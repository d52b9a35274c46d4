//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_splunk;

use quolab_setup::config::{AppConfig, ServerConfig};
use quolab_setup::controller::SetupController;
use quolab_setup::store::{Entry, MemoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const COLLECTION_PATH: &str = "/servicesNS/nobody/TA-quolab/quolab/quolab_servers";

/// Template entry as the add-on ships it.
pub fn default_entry() -> Entry {
    Entry::new("default")
        .with("url", "https://template.example")
        .with("username", "")
        .with("secret", "")
        .with("verify", true)
        .with("max_batch_size", 1000i64)
        .with("max_execution_time", 600i64)
        .with("disabled", false)
}

/// A complete user profile, secret included as the store would hold it.
pub fn server_entry(name: &str) -> Entry {
    Entry::new(name)
        .with("url", format!("https://{name}.quolab.example:1080"))
        .with("username", "jdoe")
        .with("secret", "s3cr3t")
        .with("verify", "1")
        .with("max_batch_size", "500")
        .with("max_execution_time", "300")
        .with("disabled", "0")
}

pub fn controller(entries: Vec<Entry>) -> (SetupController<MemoryStore>, MemoryStore) {
    let store = MemoryStore::with_entries(entries);
    let controller = SetupController::new(Arc::new(AppConfig::default()), store.clone());
    (controller, store)
}

/// Fill every required field of the open form with valid values.
pub fn fill_valid(controller: &mut SetupController<MemoryStore>) {
    controller.update_field("url", "https://quolab.example:1080");
    controller.update_field("username", "jdoe");
    controller.update_field("secret", "hunter2");
}

pub fn server_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        base_url: base_url.to_string(),
        username: Some("admin".to_string()),
        password: Some("changeme".to_string()),
        ..ServerConfig::default()
    }
}

/// Write `content` as a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
