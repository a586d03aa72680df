//! Interest formulas written in scripts as `2.5%` or `$10`.

use std::fmt;
use std::str::FromStr;

use fixtable_coerce::{coercion_fn, CoercionError, TypedCoercion};
use rust_decimal::Decimal;

use crate::error::AccountError;
use crate::money::Money;

/// How interest is calculated on a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestFormula {
    /// A percentage of the balance, held as a fraction (`2.5%` is `0.025`).
    AdValorem(Decimal),
    /// The same amount whatever the balance.
    Fixed(Money),
}

impl InterestFormula {
    pub fn interest_on(&self, balance: Money) -> Result<Money, AccountError> {
        match self {
            InterestFormula::AdValorem(rate) => balance.checked_mul(*rate),
            InterestFormula::Fixed(amount) => Ok(*amount),
        }
    }
}

/// `N%` or `$N`, where `N` is digits with an optional fraction.
impl FromStr for InterestFormula {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AccountError::InvalidInterestFormula(s.to_string());
        if let Some(rate) = s.strip_suffix('%') {
            let rate = unsigned_decimal(rate).ok_or_else(invalid)?;
            return Ok(InterestFormula::AdValorem(rate / Decimal::ONE_HUNDRED));
        }
        if let Some(amount) = s.strip_prefix('$') {
            let amount = unsigned_decimal(amount).ok_or_else(invalid)?;
            return Ok(InterestFormula::Fixed(Money::new(amount)));
        }
        Err(invalid())
    }
}

impl fmt::Display for InterestFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterestFormula::AdValorem(rate) => {
                write!(f, "{}%", (*rate * Decimal::ONE_HUNDRED).normalize())
            }
            InterestFormula::Fixed(amount) => write!(f, "{}", amount),
        }
    }
}

fn unsigned_decimal(s: &str) -> Option<Decimal> {
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || fraction.is_some_and(|f| !digits(f)) {
        return None;
    }
    Decimal::from_str(s).ok()
}

/// The coercion scripts use to bind interest formula members.
pub fn interest_formula_coercion() -> impl TypedCoercion<Target = InterestFormula> {
    coercion_fn(|s: &str| {
        s.parse::<InterestFormula>()
            .map_err(|e| CoercionError::invalid(s, "InterestFormula", e.to_string()))
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn parses_both_forms() {
        assert_eq!(
            "2.5%".parse::<InterestFormula>().unwrap(),
            InterestFormula::AdValorem(Decimal::new(25, 3))
        );
        assert_eq!(
            "$10".parse::<InterestFormula>().unwrap(),
            InterestFormula::Fixed(money("10.00"))
        );
    }

    #[test]
    fn rejects_everything_else() {
        for bad in ["", "%", "$", "2.5", "-1%", "$-5", "1.%", "ten%", "$1,000", " 5%"] {
            assert!(bad.parse::<InterestFormula>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn interest_on_balance() {
        let balance = money("200.00");
        assert_eq!(
            "5%".parse::<InterestFormula>().unwrap().interest_on(balance).unwrap(),
            money("10.00")
        );
        assert_eq!(
            "$3.50".parse::<InterestFormula>().unwrap().interest_on(balance).unwrap(),
            money("3.50")
        );
    }

    #[test]
    fn displays_in_script_form() {
        assert_eq!("2.5%".parse::<InterestFormula>().unwrap().to_string(), "2.5%");
        assert_eq!("$10".parse::<InterestFormula>().unwrap().to_string(), "$10.00");
    }

    #[test]
    fn coercion_reports_the_input() {
        let coercion = interest_formula_coercion();
        assert!(coercion.apply("4%").is_ok());
        let err = coercion.apply("lots").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot coerce 'lots' to InterestFormula: unparseable interest formula: lots"
        );
    }
}
