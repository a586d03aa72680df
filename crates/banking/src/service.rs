use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::account::{AccountName, BankAccount};
use crate::error::AccountError;

/// The accounts held by one bank.
#[derive(Debug, Default)]
pub struct BankAccountService {
    accounts: BTreeMap<AccountName, BankAccount>,
}

impl BankAccountService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, account: BankAccount) -> Result<&mut BankAccount, AccountError> {
        let name = account.name().clone();
        if self.accounts.contains_key(&name) {
            return Err(AccountError::DuplicateAccount(name));
        }
        tracing::info!(account = %name, "opening account");
        Ok(self.accounts.entry(name).or_insert(account))
    }

    pub fn get(&self, name: &AccountName) -> Option<&BankAccount> {
        self.accounts.get(name)
    }

    pub fn get_mut(&mut self, name: &AccountName) -> Result<&mut BankAccount, AccountError> {
        self.accounts
            .get_mut(name)
            .ok_or_else(|| AccountError::UnknownAccount(name.clone()))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// A service shared between the events and reports of one fixture.
#[derive(Debug, Clone, Default)]
pub struct SharedService(Arc<Mutex<BankAccountService>>);

impl SharedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, BankAccountService> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
