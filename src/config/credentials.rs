//! Credentials for the management API.
//!
//! Passwords and tokens are wrapped in [`SecureString`] so they never end up
//! in logs or debug output.

use super::types::ServerConfig;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// How requests to the management API authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP basic authentication.
    Basic {
        username: String,
        password: SecureString,
    },
    /// `Authorization: Bearer` token.
    Token(SecureString),
}

impl ServerConfig {
    /// Resolve credentials from the server section.
    ///
    /// A non-empty token takes precedence over username/password.
    /// Returns `None` when neither is usable.
    pub fn credentials(&self) -> Option<Credentials> {
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            return Some(Credentials::Token(SecureString::new(token.to_string())));
        }

        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Credentials::Basic {
                    username: username.to_string(),
                    password: SecureString::new(password.to_string()),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_does_not_leak() {
        let secret = SecureString::new("my-secret-key".to_string());

        let debug_output = format!("{:?}", secret);
        assert!(!debug_output.contains("my-secret-key"));
        assert!(debug_output.contains("••••••••"));

        let display_output = format!("{}", secret);
        assert!(!display_output.contains("my-secret-key"));

        assert_eq!(secret.expose(), "my-secret-key");
    }

    #[test]
    fn token_wins_over_basic() {
        let server = ServerConfig {
            username: Some("admin".to_string()),
            password: Some("changeme".to_string()),
            token: Some("tok".to_string()),
            ..ServerConfig::default()
        };
        assert_eq!(
            server.credentials(),
            Some(Credentials::Token(SecureString::new("tok".to_string())))
        );
    }

    #[test]
    fn basic_requires_both_parts() {
        let server = ServerConfig {
            username: Some("admin".to_string()),
            password: Some(String::new()),
            ..ServerConfig::default()
        };
        assert!(server.credentials().is_none());
    }

    #[test]
    fn credentials_debug_masks_password() {
        let server = ServerConfig {
            username: Some("admin".to_string()),
            password: Some("hunter2".to_string()),
            ..ServerConfig::default()
        };
        let rendered = format!("{:?}", server.credentials());
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }
}
