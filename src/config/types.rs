use serde::{Deserialize, Serialize};

use super::fields::{quolab_server_fields, FieldDescriptor};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub app: AppConfig,
}

/// Connection to the management API hosting the configuration collection.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Management endpoint (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Bearer token; used instead of username/password when set.
    #[serde(default)]
    pub token: Option<String>,
    /// Verify the server's TLS certificate (default: true).
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "••••••••"))
            .field("token", &self.token.as_ref().map(|_| "••••••••"))
            .field("verify_tls", &self.verify_tls)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Owner/app/sharing triple addressing the configuration collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub owner: String,
    pub app: String,
    pub sharing: String,
}

/// Immutable description of the add-on and its configuration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// App identifier (e.g., "TA-quolab").
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Human-readable add-on name shown in the panel title.
    #[serde(default = "default_app_label")]
    pub label: String,
    /// What one entry represents (e.g., "Server").
    #[serde(default = "default_conf_type")]
    pub conf_type: String,
    /// Collection path relative to the namespace (e.g., "quolab/quolab_servers").
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_sharing")]
    pub sharing: String,
    /// Stanza name proposed for the very first entry.
    #[serde(default = "default_stanza")]
    pub default_stanza: String,
    /// Field holding the credential; masked on read.
    #[serde(default = "default_secret_field")]
    pub secret_field: String,
    /// Field holding the enabled/disabled flag.
    #[serde(default = "default_disabled_field")]
    pub disabled_field: String,
    #[serde(default = "quolab_server_fields")]
    pub fields: Vec<FieldDescriptor>,
}

impl AppConfig {
    pub fn namespace(&self) -> Namespace {
        Namespace {
            owner: self.owner.clone(),
            app: self.name.clone(),
            sharing: self.sharing.clone(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn is_secret(&self, name: &str) -> bool {
        name == self.secret_field
    }

    /// Fields shown in the entries table: everything but the secret and the
    /// disabled flag (the latter becomes the Status column).
    pub fn table_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(|field| field.name != self.secret_field && field.name != self.disabled_field)
    }
}

fn default_base_url() -> String {
    "https://localhost:8089".to_string()
}

fn default_verify_tls() -> bool {
    true
}

fn default_timeout_seconds() -> u32 {
    30
}

fn default_app_name() -> String {
    "TA-quolab".to_string()
}

fn default_app_label() -> String {
    "QuoLab Add-on for Splunk".to_string()
}

fn default_conf_type() -> String {
    "Server".to_string()
}

fn default_path() -> String {
    "quolab/quolab_servers".to_string()
}

fn default_owner() -> String {
    "nobody".to_string()
}

fn default_sharing() -> String {
    "app".to_string()
}

fn default_stanza() -> String {
    "quolab".to_string()
}

fn default_secret_field() -> String {
    "secret".to_string()
}

fn default_disabled_field() -> String {
    "disabled".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            password: None,
            token: None,
            verify_tls: default_verify_tls(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            label: default_app_label(),
            conf_type: default_conf_type(),
            path: default_path(),
            owner: default_owner(),
            sharing: default_sharing(),
            default_stanza: default_stanza(),
            secret_field: default_secret_field(),
            disabled_field: default_disabled_field(),
            fields: quolab_server_fields(),
        }
    }
}
