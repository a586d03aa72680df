//! String-to-value coercion for fixture parameters.
//!
//! A [`Coercion`] turns the string written in a test script into a value of
//! one concrete type. A [`CoercionRegistry`] collects strategies keyed by the
//! type they produce and layers caller overrides over process-wide defaults.
//! [`CurrencyAmountCoercion`] handles money-formatted input.

mod builtin;
pub mod coercion;
pub mod currency;
mod error;
pub mod registry;

pub use builtin::{parse_bool, parse_date, parse_date_time, parse_list};
pub use coercion::{
    coercion_fn, downcast, short_type_name, CoercedValue, Coercion, FnCoercion, FromStrCoercion,
    TargetType, TypedCoercion,
};
pub use currency::{AmountPattern, CurrencyAmountCoercion, CurrencyConfig, CurrencyStyle};
pub use error::{CoercionError, PatternError, RegistryError};
pub use registry::CoercionRegistry;
