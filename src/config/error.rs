use thiserror::Error;

/// User-facing failures of `config:show`; `Display` is the message printed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigShowError {
    #[error("The \"default\" scope can't include a scope code. Try again without entering a scope code.")]
    DefaultScopeWithCode,
    #[error("A scope is missing. Enter a scope and try again.")]
    MissingScope,
    #[error("A scope code is missing. Enter a code and try again.")]
    MissingScopeCode,
    #[error("The scope code can include only lowercase letters (a-z), numbers (0-9) and underscores (_). Also, the first character must be a letter.")]
    InvalidScopeCode,
    #[error("The \"{0}\" value doesn't exist. Enter another value and try again.")]
    UnknownScope(String),
    #[error("The \"{0}\" value doesn't exist. Enter another value and try again.")]
    UnknownScopeCode(String),
    #[error("The \"{0}\" path doesn't exist. Verify and try again.")]
    UnknownPath(String),
    #[error("Configuration for path: \"{0}\" doesn't exist")]
    MissingValue(String),
}
