//! Form schemas and per-field interaction state.
//!
//! # Responsibility
//! - Declare which rule guards which field for each site form.
//! - Collect per-field diagnostics for a submission.
//! - Decide when an inline error is displayable.
//!
//! # Invariants
//! - Schema order is declaration order; errors are reported in that order.
//! - Fields absent from the input are validated as empty strings.

use super::rules::FieldRule;
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw field values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    values: HashMap<String, String>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Returns the field value, or `""` when missing.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }
}

/// One failing field and its diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: &'static str,
}

/// Diagnostics for every failing field of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    fields: Vec<FieldError>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Diagnostic for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.fields
            .iter()
            .map(|error| (error.field.as_str(), error.message))
    }

    fn push(&mut self, field: &str, message: &'static str) {
        if self.get(field).is_none() {
            self.fields.push(FieldError {
                field: field.to_string(),
                message,
            });
        }
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FormErrors {}

/// Ordered list of `(field, rule)` pairs guarding one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    name: &'static str,
    fields: Vec<(&'static str, FieldRule)>,
}

impl FormSchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: &'static str, rule: FieldRule) -> Self {
        self.fields.push((field, rule));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[(&'static str, FieldRule)] {
        &self.fields
    }

    /// Validates a single field; unknown fields are always valid.
    pub fn check_field(&self, field: &str, value: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .and_then(|(_, rule)| rule.check(value))
    }

    /// Validates every declared field.
    pub fn validate(&self, input: &FormInput) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        for (field, rule) in &self.fields {
            if let Some(message) = rule.check(input.get(field)) {
                errors.push(field, message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn login() -> Self {
        Self::new("login")
            .field("email", FieldRule::Email)
            .field("password", FieldRule::Password)
    }

    pub fn signup() -> Self {
        Self::new("signup")
            .field("name", FieldRule::Name)
            .field("email", FieldRule::Email)
            .field("password", FieldRule::SignupPassword)
    }

    pub fn contact() -> Self {
        Self::new("contact")
            .field("name", FieldRule::Name)
            .field("email", FieldRule::Email)
            .field("message", FieldRule::Message)
    }

    pub fn booking() -> Self {
        Self::new("booking")
            .field("fullName", FieldRule::FullName)
            .field("email", FieldRule::Email)
            .field("phone", FieldRule::Phone)
            .field("date", FieldRule::Required)
    }

    pub fn newsletter() -> Self {
        Self::new("newsletter").field("email", FieldRule::Email)
    }

    pub fn forgot_password() -> Self {
        Self::new("forgot_password").field("email", FieldRule::Email)
    }
}

/// Interaction state for one rendered field.
///
/// An error is only shown once the user has touched the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    rule: FieldRule,
    value: String,
    touched: bool,
}

impl FieldState {
    pub fn new(rule: FieldRule) -> Self {
        Self {
            rule,
            value: String::new(),
            touched: false,
        }
    }

    /// Records a keystroke/change. Does not mark the field as touched.
    pub fn change(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Records focus leaving the field.
    pub fn blur(&mut self) {
        self.touched = true;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Current diagnostic regardless of interaction state.
    pub fn error(&self) -> Option<&'static str> {
        self.rule.check(&self.value)
    }

    /// Diagnostic the rendering layer should show next to the field.
    pub fn visible_error(&self) -> Option<&'static str> {
        if self.touched {
            self.error()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldState, FormInput, FormSchema};
    use crate::validation::rules::FieldRule;

    #[test]
    fn validate_collects_every_failing_field() {
        let input = FormInput::new()
            .with("name", "A")
            .with("email", "nope")
            .with("message", "hello there, friends");
        let errors = FormSchema::contact().validate(&input).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("name"),
            Some("Name must be at least 2 characters long")
        );
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(errors.get("message"), None);
    }

    #[test]
    fn missing_fields_validate_as_empty() {
        let errors = FormSchema::booking()
            .validate(&FormInput::new())
            .unwrap_err();
        assert_eq!(errors.get("date"), Some("This field is required"));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn valid_booking_passes() {
        let input = FormInput::new()
            .with("fullName", "Jane Doe")
            .with("email", "jane@example.com")
            .with("phone", "+1 (555) 123-4567")
            .with("date", "2026-11-02");
        assert!(FormSchema::booking().validate(&input).is_ok());
    }

    #[test]
    fn check_field_ignores_undeclared_fields() {
        let schema = FormSchema::login();
        assert_eq!(schema.check_field("nickname", ""), None);
        assert!(schema.check_field("password", "123").is_some());
    }

    #[test]
    fn field_error_is_hidden_until_blur() {
        let mut state = FieldState::new(FieldRule::Email);
        state.change("bad");
        assert!(state.error().is_some());
        assert_eq!(state.visible_error(), None);

        state.blur();
        assert_eq!(
            state.visible_error(),
            Some("Please enter a valid email address")
        );

        state.change("ok@example.com");
        assert_eq!(state.visible_error(), None);
    }

    #[test]
    fn errors_display_in_field_order() {
        let errors = FormSchema::login()
            .validate(&FormInput::new())
            .unwrap_err();
        assert_eq!(
            errors.to_string(),
            "email: Please enter a valid email address; password: Password must be at least 6 characters long"
        );
    }
}
