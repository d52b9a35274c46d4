mod credentials;
mod fields;
mod loader;
mod types;

pub use credentials::{Credentials, SecureString};
pub use fields::{quolab_server_fields, FieldDescriptor, FieldType, Validation};
pub use loader::ConfigError;
pub use types::{AppConfig, Config, Namespace, ServerConfig};
