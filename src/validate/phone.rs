//! Telephone number validation.
use super::Validator;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Digits, whitespace, `+`, `-`, parentheses and `/`; at most 30 characters.
/// `\d` and `\s` are Unicode-aware, so non-Latin digits and NBSP separators pass.
const PHONE_PATTERN: &str = r"^[\d\s+\-()/]{1,30}$";

pub const INVALID_PHONE_MESSAGE: &str = "Phone number is not valid!";

fn phone_regex() -> &'static Regex {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"))
}

fn trim_phone(value: &str) -> &str {
    value.trim_matches(|ch| matches!(ch, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

/// Absent or empty values pass; anything else must match in full after trimming.
pub fn is_valid_phone(value: Option<&str>) -> bool {
    match value {
        None | Some("") => true,
        Some(raw) => phone_regex().is_match(trim_phone(raw)),
    }
}

/// Only string payloads are checked; other JSON values pass.
pub fn is_valid_phone_value(value: &Value) -> bool {
    match value {
        Value::String(raw) => is_valid_phone(Some(raw)),
        _ => true,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneValidator;

impl Validator<Value> for PhoneValidator {
    fn validate(&self, value: &Value) -> Vec<String> {
        if is_valid_phone_value(value) {
            Vec::new()
        } else {
            vec![INVALID_PHONE_MESSAGE.to_string()]
        }
    }
}

#[cfg(test)]
#[path = "phone_tests.rs"]
mod tests;
