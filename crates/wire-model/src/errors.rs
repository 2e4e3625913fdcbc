use std::fmt;

use serde_json::Value;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// Broad category of an [`Error`], stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ErrorKind {
    Syntax,
    MissingRequiredField,
    RequiredFieldIsNull,
    TypeMismatch,
    UnrecognizedEnumValue,
    NoMatchingUnionVariant,
    UnknownVariantValidated,
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field `{field}`")]
    MissingRequiredField { field: String },

    #[error("Required field `{field}` is null")]
    RequiredFieldIsNull { field: String },

    #[error("Field `{field}` has the wrong shape, expected {expected}: {message}")]
    TypeMismatch {
        field: String,
        expected: String,
        message: String,
    },

    #[error("{model} must be a JSON object, found {found}")]
    NotAnObject {
        model: &'static str,
        found: &'static str,
    },

    #[error("Unrecognized {name} value `{value}`, expected one of {expected:?}")]
    UnrecognizedEnumValue {
        name: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    #[error(
        "Could not find a valid {union} variant to represent data: {reason}{}",
        render_attempts(.attempts)
    )]
    NoMatchingUnionVariant {
        union: &'static str,
        reason: String,
        attempts: Vec<VariantFailure>,
    },

    #[error("{union} holds an unknown variant and cannot be validated")]
    UnknownVariantValidated { union: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Json(_) => ErrorKind::Syntax,
            Error::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            Error::RequiredFieldIsNull { .. } => ErrorKind::RequiredFieldIsNull,
            Error::TypeMismatch { .. } | Error::NotAnObject { .. } => ErrorKind::TypeMismatch,
            Error::UnrecognizedEnumValue { .. } => ErrorKind::UnrecognizedEnumValue,
            Error::NoMatchingUnionVariant { .. } => ErrorKind::NoMatchingUnionVariant,
            Error::UnknownVariantValidated { .. } => ErrorKind::UnknownVariantValidated,
        }
    }

    /// Per-variant failures collected by ordered trial, in attempt order.
    /// Empty for every other error.
    pub fn attempts(&self) -> &[VariantFailure] {
        match self {
            Error::NoMatchingUnionVariant { attempts, .. } => attempts,
            _ => &[],
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        Error::MissingRequiredField {
            field: field.to_string(),
        }
    }

    pub(crate) fn null(field: &str) -> Self {
        Error::RequiredFieldIsNull {
            field: field.to_string(),
        }
    }

    pub(crate) fn mismatch(
        field: &str,
        expected: impl Into<String>,
        message: impl fmt::Display,
    ) -> Self {
        Error::TypeMismatch {
            field: field.to_string(),
            expected: expected.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn not_an_object(model: &'static str, found: &Value) -> Self {
        Error::NotAnObject {
            model,
            found: json_type_name(found),
        }
    }
}

/// One rejected candidate from an ordered-trial union resolution.
#[derive(Debug)]
pub struct VariantFailure {
    pub variant: &'static str,
    pub error: Error,
}

impl VariantFailure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

impl fmt::Display for VariantFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.variant, self.error.kind(), self.error)
    }
}

fn render_attempts(attempts: &[VariantFailure]) -> String {
    attempts
        .iter()
        .map(|attempt| format!("\n  - {attempt}"))
        .collect()
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::missing("x").kind(), ErrorKind::MissingRequiredField);
        assert_eq!(Error::null("x").kind(), ErrorKind::RequiredFieldIsNull);
        assert_eq!(
            Error::not_an_object("TextBlock", &json!([1])).kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_aggregate_message_lists_every_attempt() {
        let err = Error::NoMatchingUnionVariant {
            union: "Content",
            reason: "no variant accepted the value".to_string(),
            attempts: vec![
                VariantFailure {
                    variant: "Text",
                    error: Error::missing("text"),
                },
                VariantFailure {
                    variant: "Blocks",
                    error: Error::mismatch("content", "array", "found number"),
                },
            ],
        };

        let message = err.to_string();
        assert!(message.starts_with("Could not find a valid Content variant"));
        assert!(message.contains("Text (MissingRequiredField): Missing required field `text`"));
        assert!(message.contains("Blocks (TypeMismatch)"));
        assert_eq!(err.attempts().len(), 2);
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!({})), "object");
        assert_eq!(json_type_name(&json!("s")), "string");
    }
}
