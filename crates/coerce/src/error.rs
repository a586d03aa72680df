/// Errors produced when a coercion strategy rejects its input.
///
/// Every variant renders as a single lower-case line so it can be placed
/// straight into a report cell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    /// The input was the empty string.
    #[error("cannot coerce an empty string to {target}")]
    Empty { target: String },

    /// The input is not a valid representation of the target type.
    #[error("cannot coerce '{input}' to {target}: {reason}")]
    Invalid {
        input: String,
        target: String,
        reason: String,
    },

    /// No configured currency pattern accepted the input.
    #[error("'{input}' does not match any of {attempted} currency patterns")]
    NoPatternMatched { input: String, attempted: usize },

    /// The input parsed, but the target type refused to be built from it.
    #[error("cannot construct {target} from '{input}': {message}")]
    Construction {
        input: String,
        target: String,
        message: String,
    },

    /// The strategy panicked instead of returning an error.
    #[error("coercion to {target} failed unexpectedly: {message}")]
    Panicked {
        target: String,
        message: String,
    },

    /// The strategy produced a value of a different type than it declared.
    #[error("coercion did not produce a value of type {expected}")]
    TypeMismatch { expected: String },
}

impl CoercionError {
    /// Shorthand for [`CoercionError::Invalid`].
    pub fn invalid(input: &str, target: impl Into<String>, reason: impl Into<String>) -> Self {
        CoercionError::Invalid {
            input: input.to_string(),
            target: target.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by a [`CoercionRegistry`](crate::CoercionRegistry) lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Neither the registry nor any registry it layers over holds a
    /// strategy for the requested type.
    #[error("no coercion available for {target}")]
    NoCoercionAvailable { target: String },

    /// A strategy was found but rejected the input.
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

/// Errors raised while compiling currency patterns or loading their config.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// The pattern string has no `0`/`#` digit placeholders.
    #[error("currency pattern '{pattern}' has no digit placeholders")]
    NoDigits { pattern: String },

    /// The pattern string is structurally malformed.
    #[error("invalid currency pattern '{pattern}': {reason}")]
    Malformed { pattern: String, reason: String },

    /// The thousands and decimal separators of a style are the same character.
    #[error("thousands and decimal separators must differ (both '{separator}')")]
    SeparatorClash { separator: char },

    /// The configuration document could not be deserialized.
    #[error("invalid currency configuration: {0}")]
    Config(#[from] serde_json::Error),
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
