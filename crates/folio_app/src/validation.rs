//! Contact form field rules
//!
//! Values are trimmed before checking. Lengths count characters.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// The contact form's fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Email,
    Subject,
    Message,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Name,
        FieldKind::Email,
        FieldKind::Subject,
        FieldKind::Message,
    ];

    /// The field's `name` attribute
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Email => "email",
            FieldKind::Subject => "subject",
            FieldKind::Message => "message",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Capitalised label used in messages
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Name => "Name",
            FieldKind::Email => "Email",
            FieldKind::Subject => "Subject",
            FieldKind::Message => "Message",
        }
    }

    /// Minimum trimmed length; email is checked by pattern instead
    pub fn min_len(self) -> Option<usize> {
        match self {
            FieldKind::Name => Some(2),
            FieldKind::Email => None,
            FieldKind::Subject => Some(5),
            FieldKind::Message => Some(10),
        }
    }

    /// Id of the element showing this field's error
    pub fn error_id(self) -> String {
        format!("{}-error", self.name())
    }

    /// Check a raw field value
    pub fn validate(self, raw: &str) -> Result<(), ValidationError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ValidationError::Required(self));
        }
        match self.min_len() {
            Some(min) if value.chars().count() < min => Err(ValidationError::TooShort(self, min)),
            Some(_) => Ok(()),
            None if is_valid_email(value) => Ok(()),
            None => Err(ValidationError::InvalidEmail),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a field value was rejected; the display text is shown to the user
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(FieldKind),

    #[error("{0} must be at least {1} characters")]
    TooShort(FieldKind, usize),

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

/// `local@domain.tld` with no whitespace and a single `@`
pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_some_and(|pattern| pattern.is_match(value))
}
