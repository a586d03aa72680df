//! Strategies held by the process-wide default registry.

use rust_decimal::Decimal;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::coercion::{coercion_fn, FromStrCoercion, TargetType};
use crate::error::CoercionError;
use crate::registry::CoercionRegistry;

macro_rules! register_from_str {
    ($registry:expr, $($ty:ty),+ $(,)?) => {
        $( $registry.register(FromStrCoercion::<$ty>::new()); )+
    };
}

pub(crate) fn register_defaults(registry: &mut CoercionRegistry) {
    registry.register(coercion_fn(|s: &str| Ok(s.to_string())));
    registry.register(coercion_fn(parse_bool));
    register_from_str!(
        registry, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char,
        Decimal,
    );
    registry.register(coercion_fn(parse_date));
    registry.register(coercion_fn(parse_date_time));
    registry.register(coercion_fn(|s: &str| Ok(parse_list(s))));
}

/// Accepts `true`/`false`, `yes`/`no` and `y`/`n` in any case.
pub fn parse_bool(s: &str) -> Result<bool, CoercionError> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" => Ok(true),
        "false" | "no" | "n" => Ok(false),
        "" => Err(CoercionError::Empty {
            target: "bool".to_string(),
        }),
        _ => Err(CoercionError::invalid(
            s,
            "bool",
            "expected true, false, yes or no",
        )),
    }
}

/// ISO 8601 calendar date, `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<Date, CoercionError> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map_err(|e| CoercionError::invalid(s, TargetType::of::<Date>().name(), e.to_string()))
}

/// RFC 3339 timestamp with offset, e.g. `2011-03-01T09:30:00+10:00`.
pub fn parse_date_time(s: &str) -> Result<OffsetDateTime, CoercionError> {
    OffsetDateTime::parse(s, &Rfc3339).map_err(|e| {
        CoercionError::invalid(s, TargetType::of::<OffsetDateTime>().name(), e.to_string())
    })
}

/// Comma-separated list; items are trimmed and blank items dropped.
pub fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
