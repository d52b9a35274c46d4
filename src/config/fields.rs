use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::store::FieldValue;

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Url,
    Int,
    Bool,
    Secret,
}

/// Value constraint attached to a field, e.g. `{type = "regex", value = "^\\w+$"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Validation {
    Regex(String),
}

impl Validation {
    /// Compile the pattern anchored so it must match the whole value.
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        match self {
            Validation::Regex(pattern) => Regex::new(&format!("^(?:{pattern})$")),
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            Validation::Regex(pattern) => pattern,
        }
    }
}

/// Static description of one configuration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<FieldValue>,
    #[serde(default)]
    pub validation: Option<Validation>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    /// Keep the value out of sight when rendered.
    #[serde(default)]
    pub hidden: bool,
}

impl FieldDescriptor {
    fn new(name: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            required: false,
            default: None,
            validation: None,
            description: None,
            help: None,
            example: None,
            hidden: false,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn regex(mut self, pattern: &str) -> Self {
        self.validation = Some(Validation::Regex(pattern.to_string()));
        self
    }

    fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    fn help(mut self, text: &str) -> Self {
        self.help = Some(text.to_string());
        self
    }

    fn example(mut self, text: &str) -> Self {
        self.example = Some(text.to_string());
        self
    }

    fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn is_secret(&self) -> bool {
        self.field_type == FieldType::Secret
    }

    /// Default rendered as form text; empty when there is none.
    pub fn default_text(&self) -> String {
        self.default
            .as_ref()
            .map(FieldValue::to_form_string)
            .unwrap_or_default()
    }
}

/// Field set of the QuoLab server stanza.
pub fn quolab_server_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("url", "URL", FieldType::Url)
            .required()
            .regex(r"^https?://[^\s]+$")
            .description("The server name and port where QuoLab API requests will be sent")
            .help("This is the same URL used for accessing the QuoLab web user interface")
            .example("https://example.server.com:1080/service"),
        FieldDescriptor::new("username", "Username", FieldType::String)
            .required()
            .regex(r"^[\w_.-]+$")
            .description("Username for the QuoLab server.")
            .help("Username can be a regular user account name, or 'TOKEN' when using token-based authentication.")
            .example("jdoe"),
        FieldDescriptor::new("secret", "Password", FieldType::Secret)
            .required()
            .default_value("HIDDEN")
            .description("The password associated with the given username or a token")
            .hidden(),
        FieldDescriptor::new("verify", "Verify", FieldType::Bool)
            .default_value(true)
            .description("Use HTTPS certificate validation")
            .help("The QuoLab HTTPS listener using a publicly signed certificate. This should never be false if your QuoLab server is accessed on a public internet connection."),
        FieldDescriptor::new("max_batch_size", "Max Batch Size", FieldType::Int)
            .required()
            .default_value(500)
            .description("Number of catalog items to fetch per HTTP call")
            .help("The maximum number of results that can be fetched in a single query to the API."),
        FieldDescriptor::new("max_execution_time", "Max Execution Time", FieldType::Int)
            .required()
            .default_value(300)
            .description("The longest duration in seconds that any individual query may last."),
        FieldDescriptor::new("disabled", "Disabled", FieldType::Bool)
            .default_value(false)
            .description("Toggle configuration entry status"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_must_match_whole_value() {
        let regex = Validation::Regex(r"[a-z]+".to_string()).compile().unwrap();
        assert!(regex.is_match("abc"));
        assert!(!regex.is_match("abc1"));
        assert!(!regex.is_match("1abc"));
    }

    #[test]
    fn alternation_is_anchored_as_a_group() {
        let regex = Validation::Regex("a|b".to_string()).compile().unwrap();
        assert!(regex.is_match("a"));
        assert!(!regex.is_match("ab"));
    }

    #[test]
    fn quolab_fields_have_expected_defaults() {
        let fields = quolab_server_fields();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "url",
                "username",
                "secret",
                "verify",
                "max_batch_size",
                "max_execution_time",
                "disabled"
            ]
        );

        let batch = fields.iter().find(|f| f.name == "max_batch_size").unwrap();
        assert_eq!(batch.default_text(), "500");
        let verify = fields.iter().find(|f| f.name == "verify").unwrap();
        assert_eq!(verify.default_text(), "true");
        assert!(fields.iter().find(|f| f.name == "secret").unwrap().is_secret());
    }

    #[test]
    fn descriptor_deserializes_from_toml() {
        let descriptor: FieldDescriptor = toml::from_str(
            r#"
            name = "url"
            label = "URL"
            type = "url"
            required = true
            validation = { type = "regex", value = "^https?://.+$" }
            "#,
        )
        .unwrap();

        assert_eq!(descriptor.field_type, FieldType::Url);
        assert!(descriptor.required);
        assert_eq!(
            descriptor.validation,
            Some(Validation::Regex("^https?://.+$".to_string()))
        );
    }
}
