//! The events and reports a banking script can name.

use fixtable_bind::{
    absent_default, single_cell, single_column, Bindable, Event, Fixture, FixtureError,
    MemberSet, ParameterSet, Report, Table,
};
use fixtable_coerce::{CoercionRegistry, CurrencyAmountCoercion};

use crate::account::{AccountName, BankAccount};
use crate::error::AccountError;
use crate::interest::{interest_formula_coercion, InterestFormula};
use crate::money::Money;
use crate::service::SharedService;

impl From<AccountError> for FixtureError {
    fn from(err: AccountError) -> Self {
        FixtureError::execution(err.to_string())
    }
}

fn required<T: Clone>(value: &Option<T>, member: &str) -> Result<T, FixtureError> {
    value
        .clone()
        .ok_or_else(|| FixtureError::execution(format!("no value given for '{}'", member)))
}

/// The coercions every banking step binds with.
pub fn banking_registry() -> CoercionRegistry {
    let mut registry = CoercionRegistry::with_defaults();
    registry
        .register(CurrencyAmountCoercion::<Money>::new())
        .register_from_str::<AccountName>();
    registry
}

/// A fixture wired to `service`.
pub fn bank_fixture(service: &SharedService) -> Fixture {
    let mut fixture = Fixture::with_registry(banking_registry());

    let s = service.clone();
    fixture.event("Open Account", move || OpenAccount::new(s.clone()));
    let s = service.clone();
    fixture.event("Deposit", move || Deposit::new(s.clone()));
    let s = service.clone();
    fixture.event("Withdraw", move || Withdraw::new(s.clone()));
    let s = service.clone();
    fixture.event("Add Interest", move || AddInterest::new(s.clone()));

    let s = service.clone();
    fixture.report("Balance", move || {
        CustomerReport::new(s.clone(), |account| single_cell(account.balance()))
    });
    let s = service.clone();
    fixture.report("Statement", move || {
        CustomerReport::new(s.clone(), BankAccount::statement)
    });
    let s = service.clone();
    fixture.report("Tags", move || {
        CustomerReport::new(s.clone(), |account| single_column(account.tags()))
    });

    fixture
}

// ──────────────────────────────────────────────
// Events
// ──────────────────────────────────────────────

pub struct OpenAccount {
    service: SharedService,
    account_name: Option<AccountName>,
    initial_deposit: Option<Money>,
    tags: Vec<String>,
    interest_formula: Option<InterestFormula>,
}

impl OpenAccount {
    pub fn new(service: SharedService) -> Self {
        OpenAccount {
            service,
            account_name: absent_default(),
            initial_deposit: absent_default(),
            tags: Vec::new(),
            interest_formula: absent_default(),
        }
    }
}

impl Bindable for OpenAccount {
    fn describe(members: &mut MemberSet<Self>) {
        members
            .optional("account_name", |e: &mut Self, v: Option<AccountName>| e.account_name = v)
            .optional("initial_deposit", |e: &mut Self, v: Option<Money>| e.initial_deposit = v)
            .field("tags", |e: &mut Self, v: Vec<String>| e.tags = v)
            .optional("interest_formula", |e: &mut Self, v: Option<InterestFormula>| {
                e.interest_formula = v
            });
    }

    fn before_bind(&mut self, _parameters: &ParameterSet, registry: &mut CoercionRegistry) {
        registry.register(interest_formula_coercion());
    }
}

impl Event for OpenAccount {
    fn execute(&mut self) -> Result<(), FixtureError> {
        let name = required(&self.account_name, "Account Name")?;
        let mut service = self.service.lock();
        let account = service.open(BankAccount::new(
            name,
            std::mem::take(&mut self.tags),
            self.interest_formula,
        ))?;
        if let Some(amount) = self.initial_deposit {
            account.deposit(amount)?;
        }
        Ok(())
    }
}

pub struct Deposit {
    service: SharedService,
    account_name: Option<AccountName>,
    amount: Option<Money>,
}

impl Deposit {
    pub fn new(service: SharedService) -> Self {
        Deposit {
            service,
            account_name: absent_default(),
            amount: absent_default(),
        }
    }
}

impl Bindable for Deposit {
    fn describe(members: &mut MemberSet<Self>) {
        members
            .optional("account_name", |e: &mut Self, v: Option<AccountName>| e.account_name = v)
            .optional("amount", |e: &mut Self, v: Option<Money>| e.amount = v);
    }
}

impl Event for Deposit {
    fn execute(&mut self) -> Result<(), FixtureError> {
        let name = required(&self.account_name, "Account Name")?;
        let amount = required(&self.amount, "Amount")?;
        self.service.lock().get_mut(&name)?.deposit(amount)?;
        Ok(())
    }
}

pub struct Withdraw {
    service: SharedService,
    account_name: Option<AccountName>,
    amount: Option<Money>,
}

impl Withdraw {
    pub fn new(service: SharedService) -> Self {
        Withdraw {
            service,
            account_name: absent_default(),
            amount: absent_default(),
        }
    }
}

impl Bindable for Withdraw {
    fn describe(members: &mut MemberSet<Self>) {
        members
            .optional("account_name", |e: &mut Self, v: Option<AccountName>| e.account_name = v)
            .optional("amount", |e: &mut Self, v: Option<Money>| e.amount = v);
    }
}

impl Event for Withdraw {
    fn execute(&mut self) -> Result<(), FixtureError> {
        let name = required(&self.account_name, "Account Name")?;
        let amount = required(&self.amount, "Amount")?;
        self.service.lock().get_mut(&name)?.withdraw(amount)?;
        Ok(())
    }
}

pub struct AddInterest {
    service: SharedService,
    account_name: Option<AccountName>,
}

impl AddInterest {
    pub fn new(service: SharedService) -> Self {
        AddInterest {
            service,
            account_name: absent_default(),
        }
    }
}

impl Bindable for AddInterest {
    fn describe(members: &mut MemberSet<Self>) {
        members.optional("account_name", |e: &mut Self, v: Option<AccountName>| {
            e.account_name = v
        });
    }
}

impl Event for AddInterest {
    fn execute(&mut self) -> Result<(), FixtureError> {
        let name = required(&self.account_name, "Account Name")?;
        self.service.lock().get_mut(&name)?.add_interest()?;
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Reports
// ──────────────────────────────────────────────

type Render = fn(&BankAccount) -> Table;

/// A report about one customer's account. Unknown accounts render as a
/// single `Unknown Account` cell.
pub struct CustomerReport {
    service: SharedService,
    account_name: Option<AccountName>,
    render: Render,
}

impl CustomerReport {
    pub fn new(service: SharedService, render: Render) -> Self {
        CustomerReport {
            service,
            account_name: absent_default(),
            render,
        }
    }
}

impl Bindable for CustomerReport {
    fn describe(members: &mut MemberSet<Self>) {
        members.optional("account_name", |r: &mut Self, v: Option<AccountName>| {
            r.account_name = v
        });
    }
}

impl Report for CustomerReport {
    fn report(&self) -> Result<Table, FixtureError> {
        let name = required(&self.account_name, "Account Name")?;
        let service = self.service.lock();
        Ok(match service.get(&name) {
            Some(account) => (self.render)(account),
            None => single_cell("Unknown Account"),
        })
    }
}
