use std::fmt;

use fixtable_coerce::CoercionError;

use crate::member::MemberCollision;

/// What went wrong for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindErrorKind {
    /// The parameter name matched no bindable member.
    UnknownParameter,
    /// The matched member's type has no registered coercion.
    NoCoercionAvailable,
    /// A coercion ran but rejected the value, or failed unexpectedly.
    ConversionFailed,
    /// Two members of the target type share a canonical name.
    AmbiguousMember,
}

impl fmt::Display for BindErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BindErrorKind::UnknownParameter => "UnknownParameter",
            BindErrorKind::NoCoercionAvailable => "NoCoercionAvailable",
            BindErrorKind::ConversionFailed => "ConversionFailed",
            BindErrorKind::AmbiguousMember => "AmbiguousMember",
        };
        f.write_str(s)
    }
}

/// One binding problem, named after the parameter (or member) at fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BindError {
    pub parameter: String,
    pub kind: BindErrorKind,
    /// Report-ready description of the problem.
    pub message: String,
    #[source]
    pub cause: Option<CoercionError>,
}

impl BindError {
    pub fn unknown_parameter(parameter: &str) -> Self {
        BindError {
            parameter: parameter.to_string(),
            kind: BindErrorKind::UnknownParameter,
            message: format!("no member matches parameter '{}'", parameter),
            cause: None,
        }
    }

    pub fn no_coercion(parameter: &str, target: &str) -> Self {
        BindError {
            parameter: parameter.to_string(),
            kind: BindErrorKind::NoCoercionAvailable,
            message: format!(
                "parameter '{}': no coercion available for {}",
                parameter, target
            ),
            cause: None,
        }
    }

    pub fn conversion_failed(
        parameter: &str,
        value: &str,
        target: &str,
        cause: CoercionError,
    ) -> Self {
        BindError {
            parameter: parameter.to_string(),
            kind: BindErrorKind::ConversionFailed,
            message: format!(
                "parameter '{}': cannot convert '{}' to {}: {}",
                parameter,
                value,
                target,
                conversion_detail(&cause)
            ),
            cause: Some(cause),
        }
    }

    pub fn ambiguous_member(collision: &MemberCollision) -> Self {
        BindError {
            parameter: collision.second.to_string(),
            kind: BindErrorKind::AmbiguousMember,
            message: format!(
                "members '{}' and '{}' both match the name '{}'",
                collision.first, collision.second, collision.canonical
            ),
            cause: None,
        }
    }
}

/// What went wrong inside a conversion, without repeating the input and
/// target the surrounding message already names.
fn conversion_detail(cause: &CoercionError) -> String {
    match cause {
        CoercionError::Empty { .. } => "the value is empty".to_string(),
        CoercionError::Invalid { reason, .. } => reason.clone(),
        CoercionError::NoPatternMatched { attempted, .. } => {
            format!("does not match any of {} currency patterns", attempted)
        }
        CoercionError::Construction { message, .. } => message.clone(),
        CoercionError::Panicked { message, .. } => format!("failed unexpectedly: {}", message),
        CoercionError::TypeMismatch { .. } => cause.to_string(),
    }
}

/// Every problem found by one binding attempt, in parameter order.
///
/// Never empty. A target that produced a `BindingFailure` must be treated as
/// unbound: some of its members may already have been assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingFailure {
    errors: Vec<BindError>,
}

impl BindingFailure {
    /// Returns `None` when `errors` is empty.
    pub fn new(errors: Vec<BindError>) -> Option<Self> {
        (!errors.is_empty()).then_some(BindingFailure { errors })
    }

    pub fn errors(&self) -> &[BindError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<BindError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; present for API symmetry with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BindError> {
        self.errors.iter()
    }
}

impl fmt::Display for BindingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for BindingFailure {}

impl<'a> IntoIterator for &'a BindingFailure {
    type Item = &'a BindError;
    type IntoIter = std::slice::Iter<'a, BindError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Result of one binding attempt.
pub type BindingOutcome = Result<(), BindingFailure>;

/// Errors raised while running an event or report from a script.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// Parameters could not be bound onto the event or report.
    #[error("{0}")]
    Binding(#[from] BindingFailure),

    /// The event or report ran and failed.
    #[error("{0}")]
    Execution(String),

    /// The fixture has no event with this name.
    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    /// The fixture has no report with this name.
    #[error("unknown report '{0}'")]
    UnknownReport(String),
}

impl FixtureError {
    pub fn execution(message: impl Into<String>) -> Self {
        FixtureError::Execution(message.into())
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
