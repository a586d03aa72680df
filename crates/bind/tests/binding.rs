//! End-to-end binding of script parameters onto a small domain type.

use fixtable_bind::coerce::{CoercionRegistry, CurrencyAmountCoercion};
use fixtable_bind::{bind, BindErrorKind, Bindable, MemberSet, ParameterSet};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Money(Decimal);

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money(d)
    }
}

#[derive(Debug, Default)]
struct Payment {
    amount: Option<Money>,
    tag: Option<String>,
    tags: Vec<String>,
}

impl Bindable for Payment {
    fn describe(members: &mut MemberSet<Self>) {
        members
            .field("amount", |p: &mut Self, v: Money| p.amount = Some(v))
            .optional("tag", |p: &mut Self, v: Option<String>| p.tag = v)
            .field("tags", |p: &mut Self, v: Vec<String>| p.tags = v);
    }
}

fn registry() -> CoercionRegistry {
    CoercionRegistry::with_defaults().with(CurrencyAmountCoercion::<Money>::new())
}

fn params(pairs: &[(&str, &str)]) -> ParameterSet {
    ParameterSet::from_pairs(pairs.iter().copied()).unwrap()
}

#[test]
fn amount_bound_and_absent_tag_left_alone() {
    let mut payment = Payment::default();
    bind(&mut payment, &params(&[("amount", "$25.00")]), &registry()).unwrap();
    assert_eq!(payment.amount, Some(Money(Decimal::new(2500, 2))));
    assert_eq!(payment.tag, None);
}

#[test]
fn present_tag_is_wrapped() {
    let mut payment = Payment::default();
    bind(
        &mut payment,
        &params(&[("Amount", "($1,234.56)"), ("Tag", "rent")]),
        &registry(),
    )
    .unwrap();
    assert_eq!(payment.amount, Some(Money(Decimal::new(-123456, 2))));
    assert_eq!(payment.tag.as_deref(), Some("rent"));
}

#[test]
fn misspelled_parameter_is_the_only_error() {
    let mut payment = Payment::default();
    let failure = bind(&mut payment, &params(&[("amoutn", "$25.00")]), &registry()).unwrap_err();
    assert_eq!(failure.len(), 1);
    let err = &failure.errors()[0];
    assert_eq!(err.kind, BindErrorKind::UnknownParameter);
    assert_eq!(err.parameter, "amoutn");
    assert_eq!(err.message, "no member matches parameter 'amoutn'");
}

#[test]
fn unparseable_amount_names_the_parameter() {
    let mut payment = Payment::default();
    let failure = bind(
        &mut payment,
        &params(&[("amount", "twenty dollars")]),
        &registry(),
    )
    .unwrap_err();
    assert_eq!(failure.len(), 1);
    let err = &failure.errors()[0];
    assert_eq!(err.kind, BindErrorKind::ConversionFailed);
    assert_eq!(err.parameter, "amount");
    assert!(err.message.contains("twenty dollars"));
    assert!(err.message.contains("Money"));
}

#[test]
fn money_without_a_registered_coercion() {
    let mut payment = Payment::default();
    let failure = bind(
        &mut payment,
        &params(&[("amount", "$1.00"), ("tag", "x")]),
        &CoercionRegistry::with_defaults(),
    )
    .unwrap_err();
    assert_eq!(failure.len(), 1);
    assert_eq!(failure.errors()[0].kind, BindErrorKind::NoCoercionAvailable);
    assert_eq!(payment.tag.as_deref(), Some("x"));
}

#[test]
fn every_failure_is_reported_in_order() {
    let mut payment = Payment::default();
    let failure = bind(
        &mut payment,
        &params(&[
            ("tagz", "a"),
            ("amount", "25 dollars"),
            ("tags", "a, b"),
            ("when", "today"),
        ]),
        &registry(),
    )
    .unwrap_err();

    let summary: Vec<(&str, BindErrorKind)> = failure
        .iter()
        .map(|e| (e.parameter.as_str(), e.kind))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("tagz", BindErrorKind::UnknownParameter),
            ("amount", BindErrorKind::ConversionFailed),
            ("when", BindErrorKind::UnknownParameter),
        ]
    );
    assert_eq!(failure.to_string().lines().count(), 3);
    assert_eq!(payment.tags, vec!["a".to_string(), "b".to_string()]);
}

#[derive(Default)]
struct Ambiguous {
    first_name: String,
}

impl Bindable for Ambiguous {
    fn describe(members: &mut MemberSet<Self>) {
        members
            .field("first_name", |a: &mut Self, v: String| a.first_name = v)
            .field("FirstName", |a: &mut Self, v: String| a.first_name = v);
    }
}

#[test]
fn colliding_members_fail_every_bind() {
    let mut target = Ambiguous::default();
    let failure = bind(&mut target, &ParameterSet::new(), &registry()).unwrap_err();
    assert_eq!(failure.len(), 1);
    assert_eq!(failure.errors()[0].kind, BindErrorKind::AmbiguousMember);
    assert_eq!(
        failure.errors()[0].message,
        "members 'first_name' and 'FirstName' both match the name 'firstname'"
    );
}
