//! Format rules for user-supplied text fields.
//!
//! Every business method checks its string arguments against one of the
//! [`FieldRule`] constants below before touching storage. A failed check is an
//! expected outcome (the method returns `false` / `None`), so [`FieldRule::check`]
//! yields a plain message instead of a [`CoreError`](crate::error::CoreError).

use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidateEmail, ValidateUrl};

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[.\-_a-zA-Z][.\-_a-zA-Z0-9]*$").expect("valid regex")
});

/// Shape constraint applied after the length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Any text within the length bounds.
    Any,
    /// Must contain at least one non-whitespace character.
    NotBlank,
    /// Letters, digits, dots, hyphens and underscores; must not start with a digit.
    Username,
    /// A well-formed email address.
    Email,
    /// Empty, or an absolute `http`/`https` URL.
    OptionalUrl,
}

/// Length and shape constraints for one kind of field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub label: &'static str,
    /// Minimum length in characters.
    pub min_len: usize,
    /// Maximum length in characters.
    pub max_len: usize,
    pub format: Format,
}

pub const USERNAME: FieldRule = FieldRule {
    label: "Username",
    min_len: 3,
    max_len: 32,
    format: Format::Username,
};

pub const PASSWORD: FieldRule = FieldRule {
    label: "Password",
    min_len: 8,
    max_len: 1024,
    format: Format::Any,
};

pub const NAME: FieldRule = FieldRule {
    label: "Name",
    min_len: 1,
    max_len: 64,
    format: Format::NotBlank,
};

pub const EMAIL: FieldRule = FieldRule {
    label: "Email",
    min_len: 3,
    max_len: 254,
    format: Format::Email,
};

pub const BIO: FieldRule = FieldRule {
    label: "Bio",
    min_len: 0,
    max_len: 256,
    format: Format::Any,
};

pub const URL: FieldRule = FieldRule {
    label: "URL",
    min_len: 0,
    max_len: 1024,
    format: Format::OptionalUrl,
};

pub const BLOG_TITLE: FieldRule = FieldRule {
    label: "Title",
    min_len: 1,
    max_len: 128,
    format: Format::NotBlank,
};

pub const BLOG_CONTENT: FieldRule = FieldRule {
    label: "Content",
    min_len: 1,
    max_len: 4096,
    format: Format::NotBlank,
};

pub const POLL_OPTION: FieldRule = FieldRule {
    label: "Option",
    min_len: 1,
    max_len: 128,
    format: Format::NotBlank,
};

/// Minimum number of options a poll must offer.
pub const MIN_POLL_OPTIONS: usize = 2;

impl FieldRule {
    /// Check `value` against this rule, returning a human-readable reason on failure.
    pub fn check(&self, value: &str) -> Result<(), String> {
        let len = value.chars().count();
        if len < self.min_len {
            return Err(if self.min_len == 1 {
                format!("{} cannot be empty.", self.label)
            } else {
                format!(
                    "{} must be at least {} characters long.",
                    self.label, self.min_len
                )
            });
        }
        if len > self.max_len {
            return Err(format!(
                "{} cannot be longer than {} characters.",
                self.label, self.max_len
            ));
        }

        let well_formed = match self.format {
            Format::Any => true,
            Format::NotBlank => !value.trim().is_empty(),
            Format::Username => USERNAME_RE.is_match(value),
            Format::Email => value.validate_email(),
            Format::OptionalUrl => value.is_empty() || is_http_url(value),
        };
        if !well_formed {
            return Err(format!("{} is not valid.", self.label));
        }
        Ok(())
    }

    pub fn is_valid(&self, value: &str) -> bool {
        self.check(value).is_ok()
    }

    pub fn is_invalid(&self, value: &str) -> bool {
        !self.is_valid(value)
    }
}

fn is_http_url(value: &str) -> bool {
    (value.starts_with("http://") || value.starts_with("https://")) && value.validate_url()
}
