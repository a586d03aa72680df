//! Registry layering as seen by a fixture author.

use fixtable_coerce::{
    coercion_fn, CoercionError, CoercionRegistry, CurrencyAmountCoercion, RegistryError,
    TargetType,
};
use rust_decimal::Decimal;

#[derive(Debug, PartialEq)]
struct TestTarget(String);

#[test]
fn custom_strategy_is_usable_through_registry() {
    let registry =
        CoercionRegistry::new().with(coercion_fn(|s: &str| Ok(TestTarget(format!("{}-TEST", s)))));
    assert_eq!(
        registry.coerce::<TestTarget>("foo").unwrap(),
        TestTarget("foo-TEST".to_string())
    );
}

#[test]
fn custom_strategy_shadows_default_for_same_type() {
    let default = CoercionRegistry::defaults().resolve_for::<Decimal>().ok().unwrap();
    let mut registry = CoercionRegistry::with_defaults();
    registry.register(CurrencyAmountCoercion::<Decimal>::new());

    let resolved = registry.resolve_for::<Decimal>().ok().unwrap();
    assert_eq!(resolved.target(), TargetType::of::<Decimal>());
    assert!(!std::ptr::addr_eq(
        std::sync::Arc::as_ptr(&resolved),
        std::sync::Arc::as_ptr(&default)
    ));
    assert_eq!(
        registry.coerce::<Decimal>("($12.50)").unwrap(),
        Decimal::new(-1250, 2)
    );
    assert!(CoercionRegistry::defaults()
        .coerce::<Decimal>("($12.50)")
        .is_err());
}

#[test]
fn missing_strategy_names_the_type() {
    let err = CoercionRegistry::with_defaults()
        .coerce::<TestTarget>("x")
        .unwrap_err();
    assert_eq!(err.to_string(), "no coercion available for TestTarget");
}

#[test]
fn strategy_error_passes_through() {
    let err = CoercionRegistry::with_defaults()
        .coerce::<i32>("12x")
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Coercion(CoercionError::Invalid { .. })
    ));
}
