//! Input validators for customer-facing form fields.
//!
//! Validators collect human-readable messages instead of failing fast so a
//! caller can report every invalid field at once.
use serde::Serialize;

pub mod name;
pub mod phone;

pub use name::{Customer, NameValidator};
pub use phone::PhoneValidator;

/// A check over a value that reports failures as messages.
pub trait Validator<T: ?Sized> {
    /// Return one message per failed rule; empty means valid.
    fn validate(&self, value: &T) -> Vec<String>;
}

/// Machine-readable result for `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub messages: Vec<String>,
}

impl ValidationReport {
    pub fn from_messages(messages: Vec<String>) -> Self {
        Self {
            valid: messages.is_empty(),
            messages,
        }
    }
}
