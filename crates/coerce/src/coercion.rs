//! The coercion strategy abstraction.
//!
//! A strategy is a pure function from a string to one concrete target type,
//! paired with a [`TargetType`] describing what it produces. Strategies are
//! type-erased behind [`Coercion`] so that a registry can hold strategies for
//! many unrelated types; [`TypedCoercion`] is the statically-typed form most
//! implementations should write.

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::error::CoercionError;

/// A coerced value whose concrete type is described by the strategy's
/// [`TargetType`].
pub type CoercedValue = Box<dyn Any + Send>;

// ──────────────────────────────────────────────
// TargetType
// ──────────────────────────────────────────────

/// Identity of the type a strategy produces.
#[derive(Clone, Copy)]
pub struct TargetType {
    id: TypeId,
    full_name: &'static str,
}

impl TargetType {
    pub fn of<T: 'static>() -> Self {
        TargetType {
            id: TypeId::of::<T>(),
            full_name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name, e.g. `alloc::string::String`.
    pub fn full_name(&self) -> &'static str {
        self.full_name
    }

    /// The type name with module paths removed, e.g. `Option<String>`.
    pub fn name(&self) -> String {
        short_type_name(self.full_name)
    }
}

impl PartialEq for TargetType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TargetType {}

impl std::hash::Hash for TargetType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetType({})", self.full_name)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Strip module paths from a `std::any::type_name` string.
///
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    out
}

// ──────────────────────────────────────────────
// Strategy traits
// ──────────────────────────────────────────────

/// A type-erased string-to-value coercion strategy.
///
/// Implementations must be pure with respect to individual calls: the same
/// input always yields the same result. Configuration belongs in the
/// strategy's construction, not in per-call state.
pub trait Coercion: Send + Sync {
    /// The type of value this strategy produces.
    fn target(&self) -> TargetType;

    /// Convert `input` into a boxed value of type [`Coercion::target`].
    fn coerce(&self, input: &str) -> Result<CoercedValue, CoercionError>;
}

/// A statically-typed coercion strategy.
///
/// Every `TypedCoercion` is a [`Coercion`] through a blanket impl.
pub trait TypedCoercion: Send + Sync {
    type Target: Send + 'static;

    fn apply(&self, input: &str) -> Result<Self::Target, CoercionError>;
}

impl<C: TypedCoercion> Coercion for C {
    fn target(&self) -> TargetType {
        TargetType::of::<C::Target>()
    }

    fn coerce(&self, input: &str) -> Result<CoercedValue, CoercionError> {
        self.apply(input).map(|v| Box::new(v) as CoercedValue)
    }
}

/// Recover the concrete value from a [`CoercedValue`].
pub fn downcast<T: 'static>(value: CoercedValue) -> Result<T, CoercionError> {
    value
        .downcast::<T>()
        .map(|v| *v)
        .map_err(|_| CoercionError::TypeMismatch {
            expected: TargetType::of::<T>().name(),
        })
}

// ──────────────────────────────────────────────
// Closure-backed strategy
// ──────────────────────────────────────────────

/// A strategy backed by a closure. Build one with [`coercion_fn`].
pub struct FnCoercion<T, F> {
    f: F,
    _target: PhantomData<fn() -> T>,
}

/// Wrap a closure as a coercion strategy for `T`.
///
/// ```
/// use fixtable_coerce::{coercion_fn, Coercion, TargetType};
///
/// let upper = coercion_fn(|s: &str| Ok(s.to_uppercase()));
/// assert_eq!(upper.target(), TargetType::of::<String>());
/// ```
pub fn coercion_fn<T, F>(f: F) -> FnCoercion<T, F>
where
    T: Send + 'static,
    F: Fn(&str) -> Result<T, CoercionError> + Send + Sync,
{
    FnCoercion {
        f,
        _target: PhantomData,
    }
}

impl<T, F> TypedCoercion for FnCoercion<T, F>
where
    T: Send + 'static,
    F: Fn(&str) -> Result<T, CoercionError> + Send + Sync,
{
    type Target = T;

    fn apply(&self, input: &str) -> Result<T, CoercionError> {
        (self.f)(input)
    }
}

// ──────────────────────────────────────────────
// FromStr-backed strategy
// ──────────────────────────────────────────────

/// A strategy that builds `T` through its [`FromStr`] impl.
///
/// This is the usual way to make a domain value type bindable when it
/// already knows how to parse itself.
pub struct FromStrCoercion<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> FromStrCoercion<T> {
    pub fn new() -> Self {
        FromStrCoercion {
            _target: PhantomData,
        }
    }
}

impl<T> Default for FromStrCoercion<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TypedCoercion for FromStrCoercion<T>
where
    T: FromStr + Send + 'static,
    T::Err: fmt::Display,
{
    type Target = T;

    fn apply(&self, input: &str) -> Result<T, CoercionError> {
        input
            .parse::<T>()
            .map_err(|e| CoercionError::invalid(input, TargetType::of::<T>().name(), e.to_string()))
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
