//! Submitted form values plus per-field error messages

use serde::Serialize;
use std::collections::HashMap;
use validator::ValidateEmail;

/// Field name → messages, first message is the one shown
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FormErrors(HashMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    /// First error message for `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A posted form: the raw values and whatever the checks found wrong
#[derive(Debug, Clone, Default, Serialize)]
pub struct Form {
    pub values: HashMap<String, String>,
    pub errors: FormErrors,
}

impl Form {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self {
            values,
            errors: FormErrors::default(),
        }
    }

    /// Trimmed value of `field`, empty when missing
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(|v| v.trim()).unwrap_or("")
    }

    /// True when `field` was posted with a non-blank value
    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn required(&mut self, fields: &[&str]) {
        for field in fields {
            if !self.has(field) {
                self.errors.add(field, "This field cannot be blank");
            }
        }
    }

    pub fn min_length(&mut self, field: &str, length: usize) -> bool {
        if self.get(field).chars().count() < length {
            self.errors
                .add(field, format!("This field must be at least {length} characters long"));
            return false;
        }
        true
    }

    pub fn is_email(&mut self, field: &str) {
        if !self.get(field).validate_email() {
            self.errors.add(field, "Invalid email address");
        }
    }

    /// Record an error found outside the generic checks
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> Form {
        Form::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_required_flags_blank_and_missing() {
        let mut f = form(&[("first_name", "   "), ("last_name", "Smith")]);
        f.required(&["first_name", "last_name", "email"]);
        assert!(!f.valid());
        assert_eq!(f.errors.get("first_name"), Some("This field cannot be blank"));
        assert_eq!(f.errors.get("email"), Some("This field cannot be blank"));
        assert_eq!(f.errors.get("last_name"), None);
    }

    #[test]
    fn test_min_length() {
        let mut f = form(&[("first_name", "Jo")]);
        assert!(!f.min_length("first_name", 3));
        assert_eq!(
            f.errors.get("first_name"),
            Some("This field must be at least 3 characters long")
        );

        let mut f = form(&[("first_name", "John")]);
        assert!(f.min_length("first_name", 3));
        assert!(f.valid());
    }

    #[test]
    fn test_is_email() {
        let mut f = form(&[("email", "x")]);
        f.is_email("email");
        assert_eq!(f.errors.get("email"), Some("Invalid email address"));

        let mut f = form(&[("email", "john@smith.com")]);
        f.is_email("email");
        assert!(f.valid());
    }

    #[test]
    fn test_first_error_wins() {
        let mut f = form(&[]);
        f.required(&["email"]);
        f.is_email("email");
        assert_eq!(f.errors.get("email"), Some("This field cannot be blank"));
    }
}
