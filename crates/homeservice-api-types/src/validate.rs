use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field name → first validation message for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message; the first message recorded for a field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub(crate) fn require_text(&mut self, field: &str, value: &str, max_chars: usize) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.insert(field, "is required");
        } else if trimmed.chars().count() > max_chars {
            self.insert(field, format!("must be at most {max_chars} characters"));
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Client-side schema check run before a payload is submitted.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("title", "is required");
        errors.insert("title", "too long");
        assert_eq!(errors.get("title"), Some("is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn display_joins_fields_in_order() {
        let mut errors = FieldErrors::new();
        errors.insert("phone", "invalid");
        errors.insert("name", "is required");
        assert_eq!(errors.to_string(), "name: is required; phone: invalid");
    }

    #[test]
    fn require_text_checks_blank_and_length() {
        let mut errors = FieldErrors::new();
        errors.require_text("a", "   ", 10);
        errors.require_text("b", "abcdef", 3);
        errors.require_text("c", "ok", 3);
        assert_eq!(errors.get("a"), Some("is required"));
        assert!(errors.get("b").is_some());
        assert!(errors.get("c").is_none());
    }
}
