//! Bindable member descriptors and their process-wide discovery cache.
//!
//! A type opts into binding by implementing [`Bindable`] and describing its
//! assignable slots once, through a [`MemberSet`]. Descriptions are cached
//! per type: the first bind against a type builds its [`Members`], every
//! later bind (on any thread) reuses the same `Arc`.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use fixtable_coerce::{downcast, CoercedValue, CoercionError, CoercionRegistry};
use once_cell::sync::Lazy;

use crate::canonical::canonicalize;
use crate::optional::{rewrap, DeclaredType};
use crate::parameters::ParameterSet;

// ──────────────────────────────────────────────
// Bindable
// ──────────────────────────────────────────────

/// A type whose public slots can be populated from a [`ParameterSet`].
pub trait Bindable: Sized + 'static {
    /// Declare every bindable member of this type.
    ///
    /// Called once per type per process; the result is cached.
    fn describe(members: &mut MemberSet<Self>);

    /// Runs before any member is bound, with the raw parameters and the
    /// registry this binding attempt will use.
    ///
    /// Register per-instance coercions here. The registry is a layer
    /// private to this attempt, so registrations do not leak into other
    /// binds.
    fn before_bind(&mut self, _parameters: &ParameterSet, _registry: &mut CoercionRegistry) {}
}

// ──────────────────────────────────────────────
// Member
// ──────────────────────────────────────────────

type Setter<T> = Box<dyn Fn(&mut T, CoercedValue) -> Result<(), CoercionError> + Send + Sync>;

/// One assignable slot on a `T`.
pub struct Member<T> {
    name: &'static str,
    canonical: String,
    declared: DeclaredType,
    setter: Setter<T>,
}

impl<T> Member<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical
    }

    pub fn declared(&self) -> DeclaredType {
        self.declared
    }

    /// Assign a value produced by a coercion for
    /// [`declared().effective()`](DeclaredType::effective). Optional members
    /// receive the value wrapped as present.
    pub fn assign(&self, target: &mut T, value: CoercedValue) -> Result<(), CoercionError> {
        (self.setter)(target, value)
    }
}

impl<T> fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .finish()
    }
}

/// Builder handed to [`Bindable::describe`].
pub struct MemberSet<T> {
    members: Vec<Member<T>>,
}

impl<T: 'static> MemberSet<T> {
    fn new() -> Self {
        MemberSet {
            members: Vec::new(),
        }
    }

    /// Declare a member holding a `V`.
    pub fn field<V, F>(&mut self, name: &'static str, set: F) -> &mut Self
    where
        V: 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push(
            name,
            DeclaredType::of::<V>(),
            Box::new(move |target, value| {
                set(target, downcast::<V>(value)?);
                Ok(())
            }),
        )
    }

    /// Declare a member holding an `Option<V>`; it is bound from a `V`
    /// coercion and left untouched when no parameter names it.
    pub fn optional<V, F>(&mut self, name: &'static str, set: F) -> &mut Self
    where
        V: 'static,
        F: Fn(&mut T, Option<V>) + Send + Sync + 'static,
    {
        self.push(
            name,
            DeclaredType::optional_of::<V>(),
            Box::new(move |target, value| {
                set(target, rewrap::<V>(value)?);
                Ok(())
            }),
        )
    }

    fn push(&mut self, name: &'static str, declared: DeclaredType, setter: Setter<T>) -> &mut Self {
        self.members.push(Member {
            name,
            canonical: canonicalize(name),
            declared,
            setter,
        });
        self
    }
}

// ──────────────────────────────────────────────
// Members
// ──────────────────────────────────────────────

/// Two members of one type whose names share a canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberCollision {
    pub canonical: String,
    pub first: &'static str,
    pub second: &'static str,
}

/// The discovered members of a `T`, indexed by canonical name.
pub struct Members<T> {
    members: Vec<Member<T>>,
    by_canonical: HashMap<String, usize>,
    collisions: Vec<MemberCollision>,
}

impl<T: Bindable> Members<T> {
    fn discover() -> Self {
        let mut set = MemberSet::new();
        T::describe(&mut set);

        let mut by_canonical = HashMap::new();
        let mut collisions = Vec::new();
        for (i, member) in set.members.iter().enumerate() {
            match by_canonical.get(&member.canonical) {
                Some(&first) => {
                    let first: &Member<T> = &set.members[first];
                    tracing::warn!(
                        target_type = std::any::type_name::<T>(),
                        first = first.name,
                        second = member.name,
                        "bindable members share a canonical name"
                    );
                    collisions.push(MemberCollision {
                        canonical: member.canonical.clone(),
                        first: first.name,
                        second: member.name,
                    });
                }
                None => {
                    by_canonical.insert(member.canonical.clone(), i);
                }
            }
        }

        Members {
            members: set.members,
            by_canonical,
            collisions,
        }
    }
}

impl<T> Members<T> {
    /// The member whose canonical name matches `name`'s. When members
    /// collide, the first declared wins.
    pub fn find(&self, name: &str) -> Option<&Member<T>> {
        self.by_canonical
            .get(&canonicalize(name))
            .map(|&i| &self.members[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member<T>> + '_ {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Canonical-name collisions found at discovery time.
    pub fn collisions(&self) -> &[MemberCollision] {
        &self.collisions
    }
}

type CachedMembers = Arc<dyn Any + Send + Sync>;

static DISCOVERED: Lazy<RwLock<HashMap<TypeId, CachedMembers>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// The members of `T`, discovered on first use and cached for the life of
/// the process.
pub fn members_of<T: Bindable>() -> Arc<Members<T>> {
    let id = TypeId::of::<T>();
    let cached = DISCOVERED
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .get(&id)
        .cloned();

    let entry = match cached {
        Some(entry) => entry,
        None => {
            // Describe outside the lock; if another thread got there first,
            // its entry is kept and ours is dropped.
            let fresh: CachedMembers = Arc::new(Members::<T>::discover());
            let mut cache = DISCOVERED.write().unwrap_or_else(|e| e.into_inner());
            Arc::clone(cache.entry(id).or_insert(fresh))
        }
    };

    match entry.downcast::<Members<T>>() {
        Ok(members) => members,
        // Entries are keyed by the TypeId of the type they describe.
        Err(_) => Arc::new(Members::<T>::discover()),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
