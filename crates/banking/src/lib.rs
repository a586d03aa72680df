//! A small banking domain and the fixture that drives it from scripts.
//!
//! Scripts open accounts, move money and add interest through named events,
//! then check balances, statements and tags through named reports. Amounts
//! are written the way people write them (`$1,250.00`, `($40.00)`) and bound
//! through the currency coercion; interest formulas (`2.5%`, `$10`) use a
//! coercion that `Open Account` registers for itself before binding.

pub mod account;
pub mod error;
pub mod fixtures;
pub mod interest;
pub mod money;
pub mod service;

pub use account::{AccountName, BankAccount, Transaction, STATEMENT_HEADER};
pub use error::AccountError;
pub use fixtures::{bank_fixture, banking_registry};
pub use interest::{interest_formula_coercion, InterestFormula};
pub use money::Money;
pub use service::{BankAccountService, SharedService};
