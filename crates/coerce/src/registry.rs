//! Layered registry of coercion strategies keyed by target type.
//!
//! A registry holds its own strategies plus an optional parent it layers
//! over. Lookup checks the registry's own strategies first and then walks
//! the parent chain, so a caller-supplied strategy always wins over a
//! default one for the same type.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::builtin;
use crate::coercion::{downcast, Coercion, FromStrCoercion, TargetType};
use crate::error::RegistryError;

static DEFAULTS: Lazy<Arc<CoercionRegistry>> = Lazy::new(|| {
    let mut registry = CoercionRegistry::new();
    builtin::register_defaults(&mut registry);
    Arc::new(registry)
});

/// An ordered, overridable collection of coercion strategies.
///
/// Treated as immutable once a binding attempt begins; cloning is cheap
/// (strategies are shared through `Arc`) and the parent chain is shared.
#[derive(Clone, Default)]
pub struct CoercionRegistry {
    strategies: Vec<Arc<dyn Coercion>>,
    index: HashMap<TypeId, usize>,
    parent: Option<Arc<CoercionRegistry>>,
}

impl CoercionRegistry {
    /// Create an empty registry with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default registry: primitive numbers, `bool`, `char`,
    /// `String`, `Decimal`, dates and comma-separated string lists.
    pub fn defaults() -> Arc<CoercionRegistry> {
        Arc::clone(&DEFAULTS)
    }

    /// Create an empty registry layered over the process-wide defaults.
    pub fn with_defaults() -> Self {
        Self::over(Self::defaults())
    }

    /// Create an empty registry layered over `parent`.
    pub fn over(parent: Arc<CoercionRegistry>) -> Self {
        CoercionRegistry {
            strategies: Vec::new(),
            index: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Create an empty registry layered over a snapshot of this one.
    ///
    /// Registrations on the returned registry never affect `self`.
    pub fn layer(&self) -> Self {
        Self::over(Arc::new(self.clone()))
    }

    /// Add a strategy, replacing any strategy this registry already holds
    /// for the same target type. Strategies in parent registries are
    /// shadowed, not removed.
    pub fn register<C: Coercion + 'static>(&mut self, strategy: C) -> &mut Self {
        self.register_shared(Arc::new(strategy))
    }

    /// Add a strategy that may also be held by other registries.
    pub fn register_shared(&mut self, strategy: Arc<dyn Coercion>) -> &mut Self {
        let target = strategy.target();
        match self.index.get(&target.id()) {
            Some(&slot) => {
                tracing::trace!(target_type = %target, "replacing registered coercion");
                self.strategies[slot] = strategy;
            }
            None => {
                self.index.insert(target.id(), self.strategies.len());
                self.strategies.push(strategy);
            }
        }
        self
    }

    /// Register a [`FromStrCoercion`] for `T`.
    pub fn register_from_str<T>(&mut self) -> &mut Self
    where
        T: std::str::FromStr + Send + 'static,
        T::Err: fmt::Display,
    {
        self.register(FromStrCoercion::<T>::new())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<C: Coercion + 'static>(mut self, strategy: C) -> Self {
        self.register(strategy);
        self
    }

    /// Find the strategy for `target`, checking this registry before its
    /// parents.
    pub fn resolve(&self, target: TargetType) -> Result<Arc<dyn Coercion>, RegistryError> {
        self.find(target.id())
            .ok_or_else(|| RegistryError::NoCoercionAvailable {
                target: target.name(),
            })
    }

    /// [`resolve`](Self::resolve) for a static type.
    pub fn resolve_for<T: 'static>(&self) -> Result<Arc<dyn Coercion>, RegistryError> {
        self.resolve(TargetType::of::<T>())
    }

    pub fn contains(&self, target: TargetType) -> bool {
        self.find(target.id()).is_some()
    }

    /// Resolve the strategy for `T` and apply it to `input`.
    pub fn coerce<T: 'static>(&self, input: &str) -> Result<T, RegistryError> {
        let strategy = self.resolve_for::<T>()?;
        let value = strategy.coerce(input)?;
        Ok(downcast::<T>(value)?)
    }

    /// Target types registered directly on this registry, in registration
    /// order. Parent registries are not included.
    pub fn targets(&self) -> impl Iterator<Item = TargetType> + '_ {
        self.strategies.iter().map(|s| s.target())
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    fn find(&self, id: TypeId) -> Option<Arc<dyn Coercion>> {
        let mut current = Some(self);
        while let Some(registry) = current {
            if let Some(&slot) = registry.index.get(&id) {
                return Some(Arc::clone(&registry.strategies[slot]));
            }
            current = registry.parent.as_deref();
        }
        None
    }
}

impl fmt::Debug for CoercionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoercionRegistry")
            .field("targets", &self.targets().collect::<Vec<_>>())
            .field("parent", &self.parent)
            .finish()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
