//! Optional member support.
//!
//! A member declared as `Option<V>` is coerced as a `V` and the result is
//! re-wrapped as present. A member with no matching parameter keeps
//! whatever the target already holds, which for an `Option` is usually
//! `None`.

use std::fmt;

use fixtable_coerce::{downcast, CoercedValue, CoercionError, TargetType};

/// The declared type of a bindable member.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DeclaredType {
    effective: TargetType,
    optional: bool,
}

impl DeclaredType {
    /// A member holding a plain `V`.
    pub fn of<V: 'static>() -> Self {
        DeclaredType {
            effective: TargetType::of::<V>(),
            optional: false,
        }
    }

    /// A member holding an `Option<V>`.
    pub fn optional_of<V: 'static>() -> Self {
        DeclaredType {
            effective: TargetType::of::<V>(),
            optional: true,
        }
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The type a coercion must produce: the wrapped type for optional
    /// members, the declared type otherwise.
    pub fn effective(&self) -> TargetType {
        self.effective
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "Option<{}>", self.effective)
        } else {
            write!(f, "{}", self.effective)
        }
    }
}

impl fmt::Debug for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclaredType({})", self)
    }
}

/// Wrap a coerced value as present.
pub fn wrap<V>(value: V) -> Option<V> {
    Some(value)
}

/// The absent value of an optional member: what a bindable type's
/// constructor should start such a member at.
pub fn absent_default<V>() -> Option<V> {
    None
}

/// Recover a coerced `V` and wrap it as present.
pub fn rewrap<V: 'static>(value: CoercedValue) -> Result<Option<V>, CoercionError> {
    downcast::<V>(value).map(wrap)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_exposes_wrapped_type() {
        let declared = DeclaredType::optional_of::<String>();
        assert!(declared.is_optional());
        assert_eq!(declared.effective(), TargetType::of::<String>());
        assert_eq!(declared.to_string(), "Option<String>");
    }

    #[test]
    fn plain_type_is_its_own_effective_type() {
        let declared = DeclaredType::of::<u32>();
        assert!(!declared.is_optional());
        assert_eq!(declared.effective(), TargetType::of::<u32>());
        assert_eq!(declared.to_string(), "u32");
    }

    #[test]
    fn wrap_and_absent() {
        assert_eq!(wrap(3), Some(3));
        assert_eq!(absent_default::<i32>(), None);
    }

    #[test]
    fn rewrap_boxed_value() {
        let boxed: CoercedValue = Box::new("tag".to_string());
        assert_eq!(rewrap::<String>(boxed).unwrap(), Some("tag".to_string()));

        let boxed: CoercedValue = Box::new(7_u8);
        assert!(rewrap::<String>(boxed).is_err());
    }
}
