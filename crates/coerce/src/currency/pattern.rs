//! Currency amount patterns.
//!
//! Pattern strings follow the decimal-format convention: `#` and `0` are
//! digit placeholders, `,` marks digit grouping and `.` marks the decimal
//! point. Everything before the first placeholder is a literal prefix and
//! everything after the last one a literal suffix. A prefix containing `-`
//! or a prefix/suffix pair wrapped in `(` `)` makes the pattern negative.
//!
//! The `,` and `.` in a pattern string are placeholders: the characters
//! actually expected in input come from the [`CurrencyStyle`] the pattern is
//! compiled against.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::PatternError;

// ──────────────────────────────────────────────
// CurrencyStyle
// ──────────────────────────────────────────────

/// Symbols and precision used to generate or compile amount patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyStyle {
    pub symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub decimal_places: u32,
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        CurrencyStyle {
            symbol: "$".to_string(),
            thousands_separator: ',',
            decimal_separator: '.',
            decimal_places: 2,
        }
    }
}

impl CurrencyStyle {
    /// A style using `symbol` with `,` grouping and two decimal places.
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        CurrencyStyle {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PatternError> {
        if self.thousands_separator == self.decimal_separator {
            return Err(PatternError::SeparatorClash {
                separator: self.decimal_separator,
            });
        }
        Ok(())
    }

    /// The eight sign/symbol placements for this style, symbol-bearing
    /// forms first:
    ///
    /// ```text
    /// $#,##0.00   -$#,##0.00   $-#,##0.00   ($#,##0.00)   $(#,##0.00)
    /// #,##0.00    -#,##0.00    (#,##0.00)
    /// ```
    pub fn patterns(&self) -> Result<Vec<AmountPattern>, PatternError> {
        self.validate()?;
        let sym = self.symbol.as_str();
        let placements: [(String, &str, bool); 8] = [
            (sym.to_string(), "", false),
            (format!("-{}", sym), "", true),
            (format!("{}-", sym), "", true),
            (format!("({}", sym), ")", true),
            (format!("{}(", sym), ")", true),
            (String::new(), "", false),
            ("-".to_string(), "", true),
            ("(".to_string(), ")", true),
        ];
        Ok(placements
            .into_iter()
            .map(|(prefix, suffix, negative)| AmountPattern {
                prefix,
                suffix: suffix.to_string(),
                negative,
                grouping: Some(self.thousands_separator),
                decimal_separator: self.decimal_separator,
                decimal_places: self.decimal_places,
            })
            .collect())
    }
}

// ──────────────────────────────────────────────
// AmountPattern
// ──────────────────────────────────────────────

/// One compiled amount pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountPattern {
    prefix: String,
    suffix: String,
    negative: bool,
    grouping: Option<char>,
    decimal_separator: char,
    decimal_places: u32,
}

const PLACEHOLDERS: &[char] = &['#', '0', ',', '.'];

impl AmountPattern {
    /// Compile a pattern string against a style's separators.
    pub fn compile(pattern: &str, style: &CurrencyStyle) -> Result<Self, PatternError> {
        style.validate()?;
        let malformed = |reason: &str| PatternError::Malformed {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let start = pattern
            .find(PLACEHOLDERS)
            .ok_or_else(|| PatternError::NoDigits {
                pattern: pattern.to_string(),
            })?;
        let end = pattern
            .rfind(PLACEHOLDERS)
            .map(|i| i + 1)
            .unwrap_or(start);
        let (prefix, rest) = pattern.split_at(start);
        let (number, suffix) = rest.split_at(end - start);

        let (integer, fraction) = match number.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (number, None),
        };
        if !integer.chars().all(|c| matches!(c, '#' | '0' | ',')) {
            return Err(malformed("unexpected character in integer part"));
        }
        if !integer.chars().any(|c| matches!(c, '#' | '0')) {
            return Err(PatternError::NoDigits {
                pattern: pattern.to_string(),
            });
        }
        let decimal_places = match fraction {
            Some(f) if f.is_empty() => return Err(malformed("decimal point without places")),
            Some(f) if !f.chars().all(|c| matches!(c, '#' | '0')) => {
                return Err(malformed("unexpected character in fraction part"))
            }
            Some(f) => f.chars().count() as u32,
            None => 0,
        };

        let parenthesized = match (prefix.contains('('), suffix.contains(')')) {
            (true, true) => true,
            (false, false) => false,
            _ => return Err(malformed("unbalanced parentheses")),
        };
        let minus = prefix.contains('-');
        if parenthesized && minus {
            return Err(malformed("both minus sign and parentheses"));
        }

        Ok(AmountPattern {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            negative: parenthesized || minus,
            grouping: integer.contains(',').then_some(style.thousands_separator),
            decimal_separator: style.decimal_separator,
            decimal_places,
        })
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Parse `input` strictly against this pattern.
    ///
    /// The whole input must be consumed. Grouping separators are optional,
    /// but when present every group after the first holds exactly three
    /// digits. The fractional part may be omitted; when present it holds
    /// exactly [`decimal_places`](Self::decimal_places) digits. Returns the
    /// signed value at the pattern's scale.
    pub fn parse(&self, input: &str) -> Option<Decimal> {
        let body = input
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;

        let (integer, fraction) = if self.decimal_places > 0 {
            match body.split_once(self.decimal_separator) {
                Some((i, f)) => (i, Some(f)),
                None => (body, None),
            }
        } else {
            (body, None)
        };

        let mut digits = self.integer_digits(integer)?;
        if let Some(f) = fraction {
            if f.chars().count() != self.decimal_places as usize
                || !f.chars().all(|c| c.is_ascii_digit())
            {
                return None;
            }
            digits.push('.');
            digits.push_str(f);
        }

        let mut value: Decimal = digits.parse().ok()?;
        value.rescale(self.decimal_places);
        if self.negative && !value.is_zero() {
            value.set_sign_negative(true);
        }
        Some(value)
    }

    fn integer_digits(&self, integer: &str) -> Option<String> {
        if integer.is_empty() {
            return None;
        }
        let Some(sep) = self.grouping.filter(|sep| integer.contains(*sep)) else {
            return integer
                .chars()
                .all(|c| c.is_ascii_digit())
                .then(|| integer.to_string());
        };
        let mut groups = integer.split(sep);
        let first = groups.next()?;
        if first.is_empty() || first.len() > 3 || !first.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let mut digits = first.to_string();
        for group in groups {
            if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            digits.push_str(group);
        }
        Some(digits)
    }

    /// Render `magnitude` in this pattern's convention.
    ///
    /// The sign of `magnitude` is ignored; the pattern's own prefix and
    /// suffix carry the sign. Values are rounded half-to-even to the
    /// pattern's decimal places.
    pub fn format(&self, magnitude: Decimal) -> String {
        let mut rounded = magnitude
            .abs()
            .round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(self.decimal_places);
        let plain = rounded.to_string();
        let (integer, fraction) = match plain.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (plain, None),
        };

        let mut out = self.prefix.clone();
        match self.grouping {
            Some(sep) => {
                let len = integer.len();
                for (i, c) in integer.chars().enumerate() {
                    if i > 0 && (len - i) % 3 == 0 {
                        out.push(sep);
                    }
                    out.push(c);
                }
            }
            None => out.push_str(&integer),
        }
        if let Some(f) = fraction {
            out.push(self.decimal_separator);
            out.push_str(&f);
        }
        out.push_str(&self.suffix);
        out
    }
}

impl fmt::Display for AmountPattern {
    /// Renders the pattern string, e.g. `($#,##0.00)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)?;
        f.write_str(if self.grouping.is_some() { "#,##0" } else { "0" })?;
        if self.decimal_places > 0 {
            f.write_str(".")?;
            for _ in 0..self.decimal_places {
                f.write_str("0")?;
            }
        }
        f.write_str(&self.suffix)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
