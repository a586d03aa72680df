//! Currency amount coercion.
//!
//! Converts money-formatted strings such as `($25,000.00)`, `$1,234.56` or
//! `-42.00` into a configured numeric target type. Input is tried against
//! each configured [`AmountPattern`] in order and the first strict match
//! wins; nothing is guessed when no pattern matches.

pub mod pattern;

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coercion::{TargetType, TypedCoercion};
use crate::error::{CoercionError, PatternError};

pub use pattern::{AmountPattern, CurrencyStyle};

// ──────────────────────────────────────────────
// Configuration
// ──────────────────────────────────────────────

/// Serializable description of the patterns a currency coercion accepts.
///
/// ```json
/// { "styles": [{ "symbol": "€", "thousands_separator": ".", "decimal_separator": "," }],
///   "patterns": ["#,##0.00 EUR"] }
/// ```
///
/// Explicit `patterns` are tried first, compiled against the first style
/// (or the default style when none is given), followed by the eight
/// generated patterns of every style. An empty configuration yields the
/// default style's eight patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub styles: Vec<CurrencyStyle>,
    pub patterns: Vec<String>,
}

impl CurrencyConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PatternError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compile the configuration into an ordered pattern list.
    pub fn compile(&self) -> Result<Vec<AmountPattern>, PatternError> {
        let default_style = CurrencyStyle::default();
        let base_style = self.styles.first().unwrap_or(&default_style);

        let mut compiled = self
            .patterns
            .iter()
            .map(|p| AmountPattern::compile(p, base_style))
            .collect::<Result<Vec<_>, _>>()?;

        if self.styles.is_empty() && self.patterns.is_empty() {
            compiled.extend(default_style.patterns()?);
        }
        for style in &self.styles {
            compiled.extend(style.patterns()?);
        }
        Ok(compiled)
    }
}

// ──────────────────────────────────────────────
// CurrencyAmountCoercion
// ──────────────────────────────────────────────

type DecimalCtor<T> = Box<dyn Fn(Decimal) -> Result<T, String> + Send + Sync>;
type PlainStringCtor<T> = Box<dyn Fn(&str) -> Result<T, String> + Send + Sync>;

/// How a parsed amount becomes a `T`.
enum Construct<T> {
    /// `T` is built from a high-precision decimal.
    Decimal(DecimalCtor<T>),
    /// `T` is built from the plain decimal string, e.g. `-25000.00`.
    PlainString(PlainStringCtor<T>),
}

/// Coerces currency-formatted strings into `T`.
pub struct CurrencyAmountCoercion<T> {
    patterns: Vec<AmountPattern>,
    construct: Construct<T>,
}

impl<T> CurrencyAmountCoercion<T>
where
    T: From<Decimal> + Send + 'static,
{
    /// Coerce into any `T: From<Decimal>` using the default `$` patterns.
    pub fn new() -> Self {
        Self::from_decimal(|amount| Ok::<T, std::convert::Infallible>(T::from(amount)))
    }
}

impl<T> Default for CurrencyAmountCoercion<T>
where
    T: From<Decimal> + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> CurrencyAmountCoercion<T> {
    /// Coerce into `T` through a fallible decimal constructor, using the
    /// default `$` patterns.
    pub fn from_decimal<F, E>(ctor: F) -> Self
    where
        F: Fn(Decimal) -> Result<T, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        CurrencyAmountCoercion {
            patterns: default_patterns(),
            construct: Construct::Decimal(Box::new(move |d| ctor(d).map_err(|e| e.to_string()))),
        }
    }

    /// Coerce into `T` through a constructor taking the plain decimal
    /// string (no symbol, no grouping, `-` for negatives), using the default
    /// `$` patterns.
    pub fn from_plain_string<F, E>(ctor: F) -> Self
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        CurrencyAmountCoercion {
            patterns: default_patterns(),
            construct: Construct::PlainString(Box::new(move |s| {
                ctor(s).map_err(|e| e.to_string())
            })),
        }
    }

    /// Replace the accepted patterns. Patterns are tried in the given order.
    pub fn with_patterns(mut self, patterns: Vec<AmountPattern>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Replace the accepted patterns with the eight generated for `style`.
    pub fn with_style(self, style: &CurrencyStyle) -> Result<Self, PatternError> {
        Ok(self.with_patterns(style.patterns()?))
    }

    /// Replace the accepted patterns with those of a compiled configuration.
    pub fn with_config(self, config: &CurrencyConfig) -> Result<Self, PatternError> {
        Ok(self.with_patterns(config.compile()?))
    }

    pub fn patterns(&self) -> &[AmountPattern] {
        &self.patterns
    }

    /// Parse `input` into a signed decimal without constructing `T`.
    pub fn parse_amount(&self, input: &str) -> Result<Decimal, CoercionError> {
        if input.is_empty() {
            return Err(CoercionError::Empty {
                target: TargetType::of::<T>().name(),
            });
        }
        self.patterns
            .iter()
            .find_map(|p| p.parse(input))
            .ok_or_else(|| CoercionError::NoPatternMatched {
                input: input.to_string(),
                attempted: self.patterns.len(),
            })
    }
}

impl<T: Send + 'static> TypedCoercion for CurrencyAmountCoercion<T> {
    type Target = T;

    fn apply(&self, input: &str) -> Result<T, CoercionError> {
        let amount = self.parse_amount(input)?;
        let built = match &self.construct {
            Construct::Decimal(ctor) => ctor(amount),
            Construct::PlainString(ctor) => ctor(&amount.to_string()),
        };
        built.map_err(|message| CoercionError::Construction {
            input: input.to_string(),
            target: TargetType::of::<T>().name(),
            message,
        })
    }
}

fn default_patterns() -> Vec<AmountPattern> {
    // The default style's separators never clash.
    CurrencyStyle::default().patterns().unwrap_or_default()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[derive(Debug, PartialEq)]
    struct Amount(Decimal);

    impl From<Decimal> for Amount {
        fn from(d: Decimal) -> Self {
            Amount(d)
        }
    }

    #[derive(Debug, PartialEq)]
    struct Cents(i64);

    impl Cents {
        fn parse(s: &str) -> Result<Self, String> {
            let (whole, frac) = s.split_once('.').ok_or("missing cents")?;
            let whole: i64 = whole.parse().map_err(|e| format!("{}", e))?;
            let frac: i64 = frac.parse().map_err(|e| format!("{}", e))?;
            Ok(Cents(whole * 100 + whole.signum() * frac))
        }
    }

    #[test]
    fn parses_every_default_form() {
        let c = CurrencyAmountCoercion::<Amount>::new();
        let cases = [
            ("$1,234.56", "1234.56"),
            ("-$1,234.56", "-1234.56"),
            ("$-1,234.56", "-1234.56"),
            ("($1,234.56)", "-1234.56"),
            ("$(1,234.56)", "-1234.56"),
            ("1,234.56", "1234.56"),
            ("-1,234.56", "-1234.56"),
            ("(1,234.56)", "-1234.56"),
        ];
        for (input, expected) in cases {
            assert_eq!(c.apply(input).unwrap(), Amount(dec(expected)), "{}", input);
        }
    }

    #[test]
    fn parenthesized_thousands() {
        let c = CurrencyAmountCoercion::<Amount>::new();
        assert_eq!(c.apply("($25,000.00)").unwrap(), Amount(dec("-25000.00")));
    }

    #[test]
    fn empty_string_is_failure_not_zero() {
        let c = CurrencyAmountCoercion::<Amount>::new();
        assert_eq!(
            c.apply("").unwrap_err(),
            CoercionError::Empty {
                target: "Amount".to_string()
            }
        );
    }

    #[test]
    fn unmatched_input_reports_pattern_count() {
        let c = CurrencyAmountCoercion::<Amount>::new();
        assert_eq!(
            c.apply("twenty dollars").unwrap_err(),
            CoercionError::NoPatternMatched {
                input: "twenty dollars".to_string(),
                attempted: 8,
            }
        );
    }

    #[test]
    fn plain_string_construction_path() {
        let c = CurrencyAmountCoercion::from_plain_string(Cents::parse);
        assert_eq!(c.apply("$1,234.56").unwrap(), Cents(123456));
        assert_eq!(c.apply("(12.05)").unwrap(), Cents(-1205));
    }

    #[test]
    fn construction_failure_is_reported() {
        let c = CurrencyAmountCoercion::from_decimal(|d: Decimal| {
            if d.is_sign_negative() {
                Err("negative amounts are not allowed")
            } else {
                Ok(Amount(d))
            }
        });
        let err = c.apply("-$5.00").unwrap_err();
        assert!(matches!(err, CoercionError::Construction { ref message, .. }
            if message == "negative amounts are not allowed"));
    }

    #[test]
    fn patterns_are_tried_in_order() {
        let style = CurrencyStyle::default();
        let patterns = vec![
            AmountPattern::compile("$#,##0.00", &style).unwrap(),
            AmountPattern::compile("#,##0.00", &style).unwrap(),
        ];
        let c = CurrencyAmountCoercion::<Amount>::new().with_patterns(patterns);
        assert_eq!(c.apply("$25.00").unwrap(), Amount(dec("25.00")));
        assert_eq!(c.apply("25.00").unwrap(), Amount(dec("25.00")));
        assert!(matches!(
            c.apply("-25.00").unwrap_err(),
            CoercionError::NoPatternMatched { attempted: 2, .. }
        ));
    }

    #[test]
    fn config_from_json() {
        let config = CurrencyConfig::from_json_str(
            r##"{
                "styles": [{"symbol": "€", "thousands_separator": ".", "decimal_separator": ","}],
                "patterns": ["#,##0.00 EUR"]
            }"##,
        )
        .unwrap();
        let c = CurrencyAmountCoercion::<Amount>::new()
            .with_config(&config)
            .unwrap();
        assert_eq!(c.patterns().len(), 9);
        assert_eq!(c.apply("1.000,50 EUR").unwrap(), Amount(dec("1000.50")));
        assert_eq!(c.apply("(€3,00)").unwrap(), Amount(dec("-3.00")));
        assert!(c.apply("$3.00").is_err());
    }

    #[test]
    fn empty_config_is_default_patterns() {
        let config = CurrencyConfig::from_json_str("{}").unwrap();
        let compiled = config.compile().unwrap();
        assert_eq!(compiled, CurrencyStyle::default().patterns().unwrap());
    }

    #[test]
    fn bad_config_is_pattern_error() {
        assert!(matches!(
            CurrencyConfig::from_json_str("{\"styles\": 3}"),
            Err(PatternError::Config(_))
        ));
    }
}
