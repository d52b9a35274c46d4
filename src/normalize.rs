//! Boolean normalization for loosely typed flags coming back from the store.

use crate::store::FieldValue;

/// Outcome of [`normalize_bool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Known(bool),
    /// Not in the table; the original value, untouched.
    Unrecognized(FieldValue),
}

impl Normalized {
    /// Truth value for display purposes. Unrecognized values count by
    /// loose truthiness, so an unknown flag reads as set.
    pub fn is_truthy(&self) -> bool {
        match self {
            Normalized::Known(value) => *value,
            Normalized::Unrecognized(value) => value.is_truthy(),
        }
    }

    pub fn into_value(self) -> FieldValue {
        match self {
            Normalized::Known(value) => FieldValue::Bool(value),
            Normalized::Unrecognized(value) => value,
        }
    }
}

/// Map `true/1/"1"/"yes"/"on"/"true"` to `true` and
/// `false/0/"0"/"no"/"off"/"false"` to `false`; strings compare
/// case-insensitively. Anything else is returned as
/// [`Normalized::Unrecognized`].
pub fn normalize_bool(value: &FieldValue) -> Normalized {
    match value {
        FieldValue::Bool(flag) => Normalized::Known(*flag),
        FieldValue::Int(1) => Normalized::Known(true),
        FieldValue::Int(0) => Normalized::Known(false),
        FieldValue::Str(text) => match text.to_lowercase().as_str() {
            "1" | "yes" | "on" | "true" => Normalized::Known(true),
            "0" | "no" | "off" | "false" => Normalized::Known(false),
            _ => Normalized::Unrecognized(value.clone()),
        },
        FieldValue::Int(_) => Normalized::Unrecognized(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_spellings() {
        for text in ["1", "yes", "Yes", "ON", "on", "true", "TRUE"] {
            assert_eq!(
                normalize_bool(&FieldValue::from(text)),
                Normalized::Known(true),
                "{text}"
            );
        }
        assert_eq!(normalize_bool(&FieldValue::Int(1)), Normalized::Known(true));
        assert_eq!(normalize_bool(&FieldValue::Bool(true)), Normalized::Known(true));
    }

    #[test]
    fn falsy_spellings() {
        for text in ["0", "no", "NO", "off", "OFF", "false", "False"] {
            assert_eq!(
                normalize_bool(&FieldValue::from(text)),
                Normalized::Known(false),
                "{text}"
            );
        }
        assert_eq!(normalize_bool(&FieldValue::Int(0)), Normalized::Known(false));
        assert_eq!(normalize_bool(&FieldValue::Bool(false)), Normalized::Known(false));
    }

    #[test]
    fn unrecognized_values_pass_through() {
        let maybe = FieldValue::from("maybe");
        assert_eq!(normalize_bool(&maybe), Normalized::Unrecognized(maybe.clone()));
        assert_eq!(normalize_bool(&maybe).into_value(), maybe);

        let two = FieldValue::Int(2);
        assert_eq!(normalize_bool(&two), Normalized::Unrecognized(two));

        let padded = FieldValue::from(" yes ");
        assert!(matches!(normalize_bool(&padded), Normalized::Unrecognized(_)));
    }

    #[test]
    fn unrecognized_values_read_as_truthy_unless_empty() {
        assert!(normalize_bool(&FieldValue::from("maybe")).is_truthy());
        assert!(!normalize_bool(&FieldValue::from("")).is_truthy());
        assert!(!normalize_bool(&FieldValue::from("off")).is_truthy());
    }
}
