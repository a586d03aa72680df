//! Events, reports, and the fixtures that name them for a script.
//!
//! A script refers to events and reports by free-form names such as
//! `Open Account` or `Balance`. A [`Fixture`] maps those names, compared
//! canonically, to factories that build a fresh event or report for each
//! step. The step's parameters are then bound onto it and it runs.

use std::collections::HashMap;
use std::fmt;

use fixtable_coerce::CoercionRegistry;

use crate::binder::bind;
use crate::canonical::canonicalize;
use crate::error::FixtureError;
use crate::member::Bindable;
use crate::parameters::ParameterSet;
use crate::report::Table;

// ──────────────────────────────────────────────
// Event / Report
// ──────────────────────────────────────────────

/// A script step that changes the system under test.
pub trait Event {
    fn execute(&mut self) -> Result<(), FixtureError>;
}

/// A script step that renders part of the system under test as a table.
pub trait Report {
    fn report(&self) -> Result<Table, FixtureError>;
}

/// An event whose parameters are bound onto its members before it runs.
///
/// Implemented for every [`Bindable`] [`Event`].
pub trait ReflectiveEvent {
    fn apply(&mut self, parameters: &ParameterSet, registry: &CoercionRegistry) -> Result<(), FixtureError>;
}

impl<T: Bindable + Event> ReflectiveEvent for T {
    fn apply(&mut self, parameters: &ParameterSet, registry: &CoercionRegistry) -> Result<(), FixtureError> {
        bind(self, parameters, registry)?;
        self.execute()
    }
}

/// A report whose parameters are bound onto its members before it renders.
///
/// Implemented for every [`Bindable`] [`Report`].
pub trait ReflectiveReport {
    fn apply(&mut self, parameters: &ParameterSet, registry: &CoercionRegistry) -> Result<Table, FixtureError>;
}

impl<T: Bindable + Report> ReflectiveReport for T {
    fn apply(&mut self, parameters: &ParameterSet, registry: &CoercionRegistry) -> Result<Table, FixtureError> {
        bind(self, parameters, registry)?;
        self.report()
    }
}

// ──────────────────────────────────────────────
// Fixture
// ──────────────────────────────────────────────

type EventFactory = Box<dyn Fn() -> Box<dyn ReflectiveEvent> + Send + Sync>;
type ReportFactory = Box<dyn Fn() -> Box<dyn ReflectiveReport> + Send + Sync>;

struct Named<F> {
    name: String,
    factory: F,
}

/// A named collection of event and report factories plus the coercion
/// registry their parameters are bound with.
pub struct Fixture {
    registry: CoercionRegistry,
    events: HashMap<String, Named<EventFactory>>,
    reports: HashMap<String, Named<ReportFactory>>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// A fixture binding through a layer over the default registry.
    pub fn new() -> Self {
        Self::with_registry(CoercionRegistry::with_defaults())
    }

    pub fn with_registry(registry: CoercionRegistry) -> Self {
        Fixture {
            registry,
            events: HashMap::new(),
            reports: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &CoercionRegistry {
        &self.registry
    }

    /// Register fixture-wide coercions here before running any step.
    pub fn registry_mut(&mut self) -> &mut CoercionRegistry {
        &mut self.registry
    }

    /// Register an event under `name`. A later event whose name is
    /// canonically equal replaces this one.
    pub fn event<E, F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        E: ReflectiveEvent + 'static,
        F: Fn() -> E + Send + Sync + 'static,
    {
        let factory: EventFactory = Box::new(move || Box::new(factory()) as Box<dyn ReflectiveEvent>);
        self.events.insert(
            canonicalize(name),
            Named {
                name: name.to_string(),
                factory,
            },
        );
        self
    }

    /// Register a report under `name`.
    pub fn report<R, F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        R: ReflectiveReport + 'static,
        F: Fn() -> R + Send + Sync + 'static,
    {
        let factory: ReportFactory = Box::new(move || Box::new(factory()) as Box<dyn ReflectiveReport>);
        self.reports.insert(
            canonicalize(name),
            Named {
                name: name.to_string(),
                factory,
            },
        );
        self
    }

    pub fn create_event(&self, name: &str) -> Result<Box<dyn ReflectiveEvent>, FixtureError> {
        self.events
            .get(&canonicalize(name))
            .map(|named| (named.factory)())
            .ok_or_else(|| FixtureError::UnknownEvent(name.to_string()))
    }

    pub fn create_report(&self, name: &str) -> Result<Box<dyn ReflectiveReport>, FixtureError> {
        self.reports
            .get(&canonicalize(name))
            .map(|named| (named.factory)())
            .ok_or_else(|| FixtureError::UnknownReport(name.to_string()))
    }

    /// Build the named event, bind `parameters` onto it and execute it.
    pub fn run_event(&self, name: &str, parameters: &ParameterSet) -> Result<(), FixtureError> {
        let mut event = self.create_event(name)?;
        tracing::debug!(event = name, "running event");
        event.apply(parameters, &self.registry)
    }

    /// Build the named report, bind `parameters` onto it and render it.
    pub fn run_report(&self, name: &str, parameters: &ParameterSet) -> Result<Table, FixtureError> {
        let mut report = self.create_report(name)?;
        tracing::debug!(report = name, "running report");
        report.apply(parameters, &self.registry)
    }

    /// Registered event names as written at registration, sorted.
    pub fn event_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.events.values().map(|n| n.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Registered report names as written at registration, sorted.
    pub fn report_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.reports.values().map(|n| n.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fixture")
            .field("events", &self.event_names())
            .field("reports", &self.report_names())
            .field("registry", &self.registry)
            .finish()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
