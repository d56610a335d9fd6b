//! Customer name validation.
//!
//! Names accept letters and combining marks from any script, digits,
//! whitespace, and a small punctuation whitelist that includes both the
//! straight and typographic apostrophe, the grave accent, and `&`.
use super::Validator;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::sync::OnceLock;

const NAME_PATTERN: &str = r"^[\p{L}\p{M},\-_.'’`&\s\d]{1,255}$";

fn name_regex() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| {
        // The bounded repetition over Unicode classes exceeds the default
        // compiled-size limit; raise it so the pattern compiles unchanged.
        RegexBuilder::new(NAME_PATTERN)
            .size_limit(64 * (1 << 20))
            .build()
            .expect("name pattern compiles")
    })
}

/// The name fields of a customer record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub middlename: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}

/// Absent or empty names are not checked.
pub fn is_valid_name(name: Option<&str>) -> bool {
    match name {
        None | Some("") => true,
        Some(name) => name_regex().is_match(name),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NameValidator;

impl Validator<Customer> for NameValidator {
    fn validate(&self, customer: &Customer) -> Vec<String> {
        let fields = [
            ("First Name", customer.firstname.as_deref()),
            ("Middle Name", customer.middlename.as_deref()),
            ("Last Name", customer.lastname.as_deref()),
        ];
        let mut messages = Vec::new();
        for (label, value) in fields {
            if !is_valid_name(value) {
                tracing::debug!(field = label, "name rejected");
                messages.push(format!("{label} is not valid!"));
            }
        }
        messages
    }
}

#[cfg(test)]
#[path = "name_tests.rs"]
mod tests;
