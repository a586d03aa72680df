//! Populate a [`Bindable`] target from a [`ParameterSet`].
//!
//! Binding never stops at the first problem. Every parameter is tried, and
//! every failure is collected into one [`BindingFailure`] in parameter order.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use fixtable_coerce::{CoercionError, CoercionRegistry};

use crate::error::{BindError, BindingFailure, BindingOutcome};
use crate::member::{members_of, Bindable, Member};
use crate::parameters::ParameterSet;

/// Bind `parameters` onto `target`, resolving coercions through `registry`.
///
/// The target's [`Bindable::before_bind`] hook runs first against a private
/// layer over `registry`. Members with no matching parameter are left as
/// they are. On failure the target may be partially assigned and should be
/// discarded.
pub fn bind<T: Bindable>(
    target: &mut T,
    parameters: &ParameterSet,
    registry: &CoercionRegistry,
) -> BindingOutcome {
    let type_name = std::any::type_name::<T>();
    tracing::debug!(
        target_type = type_name,
        parameters = parameters.len(),
        "binding parameters"
    );

    let members = members_of::<T>();
    let mut errors: Vec<BindError> = members
        .collisions()
        .iter()
        .map(BindError::ambiguous_member)
        .collect();

    let mut local = registry.layer();
    target.before_bind(parameters, &mut local);

    for (name, value) in parameters.iter() {
        let Some(member) = members.find(name) else {
            errors.push(BindError::unknown_parameter(name));
            continue;
        };
        if let Err(err) = bind_member(target, member, name, value, &local) {
            errors.push(err);
        }
    }

    match BindingFailure::new(errors) {
        None => {
            tracing::debug!(target_type = type_name, "binding succeeded");
            Ok(())
        }
        Some(failure) => {
            tracing::debug!(
                target_type = type_name,
                errors = failure.len(),
                "binding failed"
            );
            Err(failure)
        }
    }
}

/// [`bind`] against the process-wide default registry.
pub fn bind_with_defaults<T: Bindable>(target: &mut T, parameters: &ParameterSet) -> BindingOutcome {
    bind(target, parameters, &CoercionRegistry::defaults())
}

fn bind_member<T>(
    target: &mut T,
    member: &Member<T>,
    parameter: &str,
    value: &str,
    registry: &CoercionRegistry,
) -> Result<(), BindError> {
    let declared = member.declared();
    let effective = declared.effective();
    let strategy = registry
        .resolve(effective)
        .map_err(|_| BindError::no_coercion(parameter, &effective.name()))?;

    tracing::trace!(
        parameter,
        member = member.name(),
        target_type = %declared,
        "coercing member"
    );

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let coerced = strategy.coerce(value)?;
        member.assign(target, coerced)
    }));

    let result = match outcome {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(
                parameter,
                target_type = %effective,
                message = %message,
                "coercion panicked"
            );
            Err(CoercionError::Panicked {
                target: effective.name(),
                message,
            })
        }
    };

    result.map_err(|cause| BindError::conversion_failed(parameter, value, &effective.name(), cause))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
