//! Individual field checks.
//!
//! Each check returns `None` for a valid value or `Some(message)` with the
//! exact text shown next to the field. Lengths count Unicode scalar values.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 80;
const LOGIN_PASSWORD_MIN: usize = 6;
const SIGNUP_PASSWORD_MIN: usize = 8;
const PHONE_DIGITS_MIN: usize = 7;
const PHONE_DIGITS_MAX: usize = 20;
const MESSAGE_MIN: usize = 10;
const MESSAGE_MAX: usize = 2000;

/// Named field check, selectable by forms and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldRule {
    Name,
    FullName,
    Email,
    /// Login password: length only.
    Password,
    SignupPassword,
    Phone,
    Message,
    Required,
}

impl FieldRule {
    pub const ALL: [FieldRule; 8] = [
        Self::Name,
        Self::FullName,
        Self::Email,
        Self::Password,
        Self::SignupPassword,
        Self::Phone,
        Self::Message,
        Self::Required,
    ];

    /// Runs this rule against `value`.
    pub fn check(self, value: &str) -> Option<&'static str> {
        match self {
            Self::Name => name(value),
            Self::FullName => full_name(value),
            Self::Email => email(value),
            Self::Password => password(value),
            Self::SignupPassword => signup_password(value),
            Self::Phone => phone(value),
            Self::Message => message(value),
            Self::Required => required(value),
        }
    }

    /// Stable identifier, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Password => "password",
            Self::SignupPassword => "signupPassword",
            Self::Phone => "phone",
            Self::Message => "message",
            Self::Required => "required",
        }
    }

    /// Parses an identifier produced by `as_str`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.as_str() == value)
    }
}

pub fn name(value: &str) -> Option<&'static str> {
    let len = char_len(value.trim());
    if len < NAME_MIN {
        return Some("Name must be at least 2 characters long");
    }
    if len > NAME_MAX {
        return Some("Name must be less than 80 characters");
    }
    None
}

pub fn full_name(value: &str) -> Option<&'static str> {
    if char_len(value.trim()) < NAME_MIN {
        return Some("Full name must be at least 2 characters long");
    }
    None
}

pub fn email(value: &str) -> Option<&'static str> {
    if !EMAIL_RE.is_match(value) {
        return Some("Please enter a valid email address");
    }
    None
}

pub fn password(value: &str) -> Option<&'static str> {
    if char_len(value) < LOGIN_PASSWORD_MIN {
        return Some("Password must be at least 6 characters long");
    }
    None
}

/// Checks length first, then character classes in a fixed order.
pub fn signup_password(value: &str) -> Option<&'static str> {
    if char_len(value) < SIGNUP_PASSWORD_MIN {
        return Some("Password must be at least 8 characters long");
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain at least one uppercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("Password must contain at least one lowercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain at least one number");
    }
    None
}

/// Counts digits only, so formatting like `(555) 123-4567` is accepted.
pub fn phone(value: &str) -> Option<&'static str> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !(PHONE_DIGITS_MIN..=PHONE_DIGITS_MAX).contains(&digits) {
        return Some("Phone number must be 7-20 digits");
    }
    None
}

pub fn message(value: &str) -> Option<&'static str> {
    let len = char_len(value.trim());
    if len < MESSAGE_MIN {
        return Some("Message must be at least 10 characters long");
    }
    if len > MESSAGE_MAX {
        return Some("Message must be less than 2000 characters");
    }
    None
}

pub fn required(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some("This field is required");
    }
    None
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}
