use crate::account::AccountName;

/// Errors raised by the banking domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("'{input}' is not an amount of money: {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("unparseable interest formula: {0}")]
    InvalidInterestFormula(String),

    #[error("unknown account '{0}'")]
    UnknownAccount(AccountName),

    #[error("account '{0}' already exists")]
    DuplicateAccount(AccountName),

    #[error("account '{0}' has no interest formula")]
    NoInterestFormula(AccountName),

    #[error("arithmetic overflow: {message}")]
    Overflow { message: String },
}
