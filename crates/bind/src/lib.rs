//! Binding of named string parameters onto typed fixture members.
//!
//! A script step arrives as a [`ParameterSet`] of `(name, value)` strings.
//! [`bind`] pairs each parameter with a member of a [`Bindable`] target by
//! canonical name, converts the value with a strategy from a
//! [`CoercionRegistry`](fixtable_coerce::CoercionRegistry) and assigns it.
//! Every problem is collected into a single [`BindingFailure`].
//!
//! [`Fixture`] builds on this to run script events and reports by name.

pub mod binder;
pub mod canonical;
pub mod error;
pub mod fixture;
pub mod member;
pub mod optional;
pub mod parameters;
pub mod report;

pub use binder::{bind, bind_with_defaults};
pub use canonical::{canonicalize, matches};
pub use error::{BindError, BindErrorKind, BindingFailure, BindingOutcome, FixtureError};
pub use fixture::{Event, Fixture, ReflectiveEvent, ReflectiveReport, Report};
pub use member::{members_of, Bindable, Member, MemberCollision, MemberSet, Members};
pub use optional::{absent_default, wrap, DeclaredType};
pub use parameters::{ParameterError, ParameterSet};
pub use report::{single_cell, single_column, single_row, table, Table};

pub use fixtable_coerce as coerce;
