//! Bank accounts and their transaction history.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::error::AccountError;
use crate::interest::InterestFormula;
use crate::money::Money;

/// The name a customer's account is known by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountName(String);

impl AccountName {
    pub fn new(name: impl Into<String>) -> Self {
        AccountName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AccountName::new(s))
    }
}

/// One line of an account's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// 1-based position in the account's history.
    pub reference: usize,
    pub description: &'static str,
    /// Positive for credits, negative for debits.
    pub amount: Money,
    /// Balance after this transaction.
    pub balance: Money,
}

pub const STATEMENT_HEADER: [&str; 5] = ["Ref", "Description", "Credit", "Debit", "Balance"];

#[derive(Debug, Clone)]
pub struct BankAccount {
    name: AccountName,
    tags: Vec<String>,
    interest_formula: Option<InterestFormula>,
    transactions: Vec<Transaction>,
}

impl BankAccount {
    pub fn new(name: AccountName, tags: Vec<String>, interest_formula: Option<InterestFormula>) -> Self {
        BankAccount {
            name,
            tags,
            interest_formula,
            transactions: Vec::new(),
        }
    }

    pub fn name(&self) -> &AccountName {
        &self.name
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn interest_formula(&self) -> Option<InterestFormula> {
        self.interest_formula
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn balance(&self) -> Money {
        self.transactions
            .last()
            .map(|t| t.balance)
            .unwrap_or(Money::ZERO)
    }

    pub fn deposit(&mut self, amount: Money) -> Result<(), AccountError> {
        self.record("Deposit", amount)
    }

    pub fn withdraw(&mut self, amount: Money) -> Result<(), AccountError> {
        self.record("Withdrawal", -amount)
    }

    /// Credit interest on the current balance using the account's formula.
    pub fn add_interest(&mut self) -> Result<Money, AccountError> {
        let formula = self
            .interest_formula
            .ok_or_else(|| AccountError::NoInterestFormula(self.name.clone()))?;
        let interest = formula.interest_on(self.balance())?;
        self.record("Interest", interest)?;
        Ok(interest)
    }

    /// The statement table: a header row, then one row per transaction with
    /// the amount in the credit or debit column.
    pub fn statement(&self) -> Vec<Vec<String>> {
        let mut lines = vec![STATEMENT_HEADER.iter().map(|h| h.to_string()).collect()];
        for t in &self.transactions {
            let (credit, debit) = if t.amount.is_positive() {
                (t.amount.to_string(), String::new())
            } else {
                (String::new(), (-t.amount).to_string())
            };
            lines.push(vec![
                t.reference.to_string(),
                t.description.to_string(),
                credit,
                debit,
                t.balance.to_string(),
            ]);
        }
        lines
    }

    /// Append a transaction. An overflowing balance leaves the history
    /// unchanged.
    fn record(&mut self, description: &'static str, amount: Money) -> Result<(), AccountError> {
        let balance = self.balance().checked_add(amount)?;
        tracing::debug!(account = %self.name, description, %amount, %balance, "recording transaction");
        self.transactions.push(Transaction {
            reference: self.transactions.len() + 1,
            description,
            amount,
            balance,
        });
        Ok(())
    }
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

    fn account(formula: Option<&str>) -> BankAccount {
        BankAccount::new(
            AccountName::new("Ann"),
            vec!["savings".to_string()],
            formula.map(|f| f.parse().unwrap()),
        )
    }

    #[test]
    fn balance_follows_transactions() {
        let mut acct = account(None);
        assert_eq!(acct.balance(), Money::ZERO);
        acct.deposit(money("100.00")).unwrap();
        acct.withdraw(money("30.00")).unwrap();
        assert_eq!(acct.balance(), money("70.00"));
        assert_eq!(acct.transactions()[1].amount, money("-30.00"));
        assert_eq!(acct.transactions()[1].reference, 2);
    }

    #[test]
    fn interest_requires_a_formula() {
        let mut acct = account(None);
        assert_eq!(
            acct.add_interest(),
            Err(AccountError::NoInterestFormula(AccountName::new("Ann")))
        );

        let mut acct = account(Some("10%"));
        acct.deposit(money("50.00")).unwrap();
        assert_eq!(acct.add_interest().unwrap(), money("5.00"));
        assert_eq!(acct.balance(), money("55.00"));
    }

    #[test]
    fn overflowing_deposit_is_rejected() {
        let mut acct = account(None);
        let huge = money("790000000000000000000000000.00");
        let err = loop {
            match acct.deposit(huge) {
                Ok(()) => assert!(acct.transactions().len() < 200),
                Err(err) => break err,
            }
        };
        assert!(matches!(err, AccountError::Overflow { .. }));

        let before = acct.balance();
        let recorded = acct.transactions().len();
        assert!(acct.deposit(huge).is_err());
        assert_eq!(acct.balance(), before);
        assert_eq!(acct.transactions().len(), recorded);
    }

    #[test]
    fn empty_account_balance_has_two_places() {
        assert_eq!(account(None).balance().to_string(), "$0.00");
    }

    #[test]
    fn statement_splits_credits_and_debits() {
        let mut acct = account(None);
        acct.deposit(money("100.00")).unwrap();
        acct.withdraw(money("25.50")).unwrap();
        assert_eq!(
            acct.statement(),
            vec![
                vec!["Ref", "Description", "Credit", "Debit", "Balance"],
                vec!["1", "Deposit", "$100.00", "", "$100.00"],
                vec!["2", "Withdrawal", "", "$25.50", "$74.50"],
            ]
        );
    }
}
