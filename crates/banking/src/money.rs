//! Dollar amounts held to two decimal places.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::AccountError;

const SCALE: u32 = 2;

/// An amount of money, always at two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::from_parts(0, 0, 0, false, SCALE));

    /// Round `amount` half-to-even onto two decimal places.
    pub fn new(amount: Decimal) -> Self {
        let mut rounded = amount.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(SCALE);
        Money(rounded)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn checked_add(&self, other: Money) -> Result<Money, AccountError> {
        self.0
            .checked_add(other.0)
            .map(Money::new)
            .ok_or_else(|| AccountError::Overflow {
                message: format!("{} plus {} overflows", self, other),
            })
    }

    pub fn checked_sub(&self, other: Money) -> Result<Money, AccountError> {
        self.0
            .checked_sub(other.0)
            .map(Money::new)
            .ok_or_else(|| AccountError::Overflow {
                message: format!("{} minus {} overflows", self, other),
            })
    }

    pub fn checked_mul(&self, factor: Decimal) -> Result<Money, AccountError> {
        self.0
            .checked_mul(factor)
            .map(Money::new)
            .ok_or_else(|| AccountError::Overflow {
                message: format!("{} multiplied by {} overflows", self, factor),
            })
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::ZERO
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Parses plain decimals with an optional leading `$`.
impl FromStr for Money {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('$').unwrap_or(s);
        Decimal::from_str(digits)
            .map(Money::new)
            .map_err(|e| AccountError::InvalidAmount {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn always_two_places() {
        assert_eq!(Money::new(Decimal::from(5)).to_string(), "$5.00");
        assert_eq!(m("$1.5").to_string(), "$1.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::default().to_string(), "$0.00");
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(m("0.125"), m("0.12"));
        assert_eq!(m("0.135"), m("0.14"));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(m("10.00").checked_add(m("2.50")).unwrap(), m("12.50"));
        assert_eq!(m("10.00").checked_sub(m("12.50")).unwrap(), m("-2.50"));
        assert_eq!((-m("3.00")).to_string(), "$-3.00");
        assert_eq!(m("100.00").checked_mul(Decimal::new(5, 2)).unwrap(), m("5.00"));
        assert!(m("1.00").is_positive());
        assert!(!Money::ZERO.is_positive());
    }

    #[test]
    fn rejects_non_numbers() {
        let err = "$ten".parse::<Money>().unwrap_err();
        assert!(matches!(err, AccountError::InvalidAmount { ref input, .. } if input == "$ten"));
    }

    #[test]
    fn overflow_is_an_error() {
        let max = Money::new(Decimal::MAX);
        assert!(matches!(
            max.checked_mul(Decimal::from(10)),
            Err(AccountError::Overflow { .. })
        ));
        assert!(matches!(max.checked_add(max), Err(AccountError::Overflow { .. })));
        assert!(matches!(
            (-max).checked_sub(max),
            Err(AccountError::Overflow { .. })
        ));
    }
}
