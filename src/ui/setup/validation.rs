//! Local form checks run before anything is sent to the store.

use crate::config::{FieldDescriptor, FieldType};
use crate::store::{Properties, DEFAULT_ENTRY_NAME};
use crate::ui::setup::state::{FieldError, FormMode, SetupState, STANZA_FIELD};

/// Validated form contents, ready for `upsert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub stanza: String,
    pub properties: Properties,
}

/// Check the open form and build the upsert payload.
///
/// A field is invalid when it is required and blank after trimming, or when
/// it has a pattern the whole value does not match. Integer and URL fields
/// must also parse as such. The secret field skips
/// the pattern check. While editing, a blank secret keeps the stored one and
/// is left out of the payload.
pub fn validate_form(state: &SetupState) -> Result<Submission, Vec<FieldError>> {
    let config = &state.config;
    let form = &state.form;
    let mut errors = Vec::new();

    let stanza = match &form.mode {
        FormMode::Editing { original } => original.clone(),
        FormMode::Creating | FormMode::Hidden => form.stanza.trim().to_string(),
    };

    if !form.is_visible() {
        errors.push(FieldError::new(
            STANZA_FIELD,
            "No configuration entry is open for editing",
        ));
    } else if stanza.is_empty() {
        errors.push(FieldError::new(STANZA_FIELD, "Stanza name is required"));
    } else if stanza == DEFAULT_ENTRY_NAME {
        errors.push(FieldError::new(
            STANZA_FIELD,
            format!("'{DEFAULT_ENTRY_NAME}' is a reserved name"),
        ));
    } else if form.is_creating() && state.find_entry(&stanza).is_some() {
        errors.push(FieldError::new(
            STANZA_FIELD,
            format!("A {} named '{}' already exists", config.conf_type, stanza),
        ));
    }

    let mut properties = Properties::new();
    for descriptor in &config.fields {
        let value = form.value(&descriptor.name);
        let secret = config.is_secret(&descriptor.name) || descriptor.is_secret();

        if secret && form.is_editing() && value.trim().is_empty() {
            continue;
        }

        if descriptor.required && value.trim().is_empty() {
            errors.push(FieldError::new(
                &descriptor.name,
                format!("{} is required", descriptor.label),
            ));
            continue;
        }

        if let Some(message) = type_error(descriptor, value) {
            errors.push(FieldError::new(&descriptor.name, message));
            continue;
        }

        if let (false, Some(validation)) = (secret, &descriptor.validation) {
            match validation.compile() {
                Ok(pattern) if pattern.is_match(value) => {}
                Ok(_) => {
                    errors.push(FieldError::new(
                        &descriptor.name,
                        format!("{} has an invalid format", descriptor.label),
                    ));
                    continue;
                }
                Err(_) => {
                    errors.push(FieldError::new(
                        &descriptor.name,
                        format!("{} has an unusable validation pattern", descriptor.label),
                    ));
                    continue;
                }
            }
        }

        properties.insert(descriptor.name.clone(), value.to_string());
    }

    if errors.is_empty() {
        Ok(Submission { stanza, properties })
    } else {
        Err(errors)
    }
}

/// Whether a non-blank value fits its declared type.
fn type_error(descriptor: &FieldDescriptor, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    match descriptor.field_type {
        FieldType::Int if value.parse::<i64>().is_err() => {
            Some(format!("{} must be a whole number", descriptor.label))
        }
        FieldType::Url if !is_http_url(value) => {
            Some(format!("{} must be an http or https URL", descriptor.label))
        }
        _ => None,
    }
}

fn is_http_url(value: &str) -> bool {
    reqwest::Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Entry;
    use crate::ui::mvi::Reducer;
    use crate::ui::setup::{SetupIntent, SetupReducer};

    fn loaded(entries: Vec<Entry>) -> SetupState {
        SetupReducer::reduce(SetupState::default(), SetupIntent::EntriesLoaded { entries })
    }

    fn creating(entries: Vec<Entry>) -> SetupState {
        SetupReducer::reduce(loaded(entries), SetupIntent::StartCreate)
    }

    fn set(state: SetupState, name: &str, value: &str) -> SetupState {
        SetupReducer::reduce(
            state,
            SetupIntent::UpdateField {
                name: name.to_string(),
                value: value.to_string(),
            },
        )
    }

    fn filled(state: SetupState) -> SetupState {
        let state = set(state, "url", "https://quolab.example:1080");
        let state = set(state, "username", "jdoe");
        set(state, "secret", "hunter2")
    }

    fn fields_of(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn valid_form_produces_payload_with_every_field() {
        let submission = validate_form(&filled(creating(vec![]))).unwrap();

        assert_eq!(submission.stanza, "quolab");
        assert_eq!(submission.properties["url"], "https://quolab.example:1080");
        assert_eq!(submission.properties["secret"], "hunter2");
        assert_eq!(submission.properties["max_batch_size"], "500");
        assert_eq!(submission.properties["verify"], "true");
        assert_eq!(submission.properties["disabled"], "false");
        assert_eq!(submission.properties.len(), 7);
    }

    #[test]
    fn whitespace_only_required_field_is_invalid() {
        let state = set(filled(creating(vec![])), "username", "   ");
        let errors = validate_form(&state).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["username"]);
        assert_eq!(errors[0].message, "Username is required");
    }

    #[test]
    fn pattern_must_match_whole_value() {
        let state = set(filled(creating(vec![])), "url", "ftp://quolab");
        assert_eq!(fields_of(&validate_form(&state).unwrap_err()), vec!["url"]);

        let state = set(filled(creating(vec![])), "url", "https://a b");
        assert_eq!(fields_of(&validate_form(&state).unwrap_err()), vec!["url"]);
    }

    #[test]
    fn secret_is_exempt_from_patterns_but_not_required() {
        let state = set(filled(creating(vec![])), "secret", "  any thing ~!  ");
        assert!(validate_form(&state).is_ok());

        let state = set(filled(creating(vec![])), "secret", "");
        assert_eq!(fields_of(&validate_form(&state).unwrap_err()), vec!["secret"]);
    }

    #[test]
    fn blank_secret_is_kept_out_of_edit_payload() {
        let entry = Entry::new("prod")
            .with("url", "https://a")
            .with("username", "jdoe")
            .with("secret", "hunter2");
        let state = SetupReducer::reduce(
            loaded(vec![entry]),
            SetupIntent::StartEdit {
                name: "prod".to_string(),
            },
        );

        let submission = validate_form(&state).unwrap();
        assert_eq!(submission.stanza, "prod");
        assert!(!submission.properties.contains_key("secret"));
    }

    #[test]
    fn whitespace_secret_on_edit_keeps_the_stored_one() {
        let entry = Entry::new("prod")
            .with("url", "https://a")
            .with("username", "jdoe")
            .with("secret", "hunter2");
        let state = SetupReducer::reduce(
            loaded(vec![entry]),
            SetupIntent::StartEdit {
                name: "prod".to_string(),
            },
        );
        let state = set(state, "secret", "   ");

        let submission = validate_form(&state).unwrap();
        assert!(!submission.properties.contains_key("secret"));
    }

    #[test]
    fn typed_fields_must_parse() {
        let state = set(filled(creating(vec![])), "max_batch_size", "abc");
        let errors = validate_form(&state).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["max_batch_size"]);
        assert_eq!(errors[0].message, "Max Batch Size must be a whole number");

        let state = set(filled(creating(vec![])), "max_execution_time", " 900 ");
        assert!(validate_form(&state).is_ok());

        let state = set(filled(creating(vec![])), "url", "quolab.example");
        let errors = validate_form(&state).unwrap_err();
        assert_eq!(errors[0].message, "URL must be an http or https URL");
    }

    #[test]
    fn stanza_rules() {
        let existing = vec![Entry::new("prod")];

        let state = filled(creating(existing.clone()));
        assert_eq!(fields_of(&validate_form(&state).unwrap_err()), vec!["stanza"]);

        let state = set(filled(creating(existing.clone())), "stanza", "default");
        let errors = validate_form(&state).unwrap_err();
        assert!(errors[0].message.contains("reserved"));

        let state = set(filled(creating(existing.clone())), "stanza", "prod");
        let errors = validate_form(&state).unwrap_err();
        assert!(errors[0].message.contains("already exists"));

        let state = set(filled(creating(existing)), "stanza", "  lab  ");
        assert_eq!(validate_form(&state).unwrap().stanza, "lab");
    }

    #[test]
    fn hidden_form_cannot_be_submitted() {
        assert!(validate_form(&loaded(vec![])).is_err());
    }

    #[test]
    fn every_invalid_field_is_reported_in_form_order() {
        let state = set(creating(vec![Entry::new("prod")]), "max_batch_size", "");
        let errors = validate_form(&state).unwrap_err();
        assert_eq!(
            fields_of(&errors),
            vec!["stanza", "url", "username", "secret", "max_batch_size"]
        );
    }
}
