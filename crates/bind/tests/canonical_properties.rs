//! Property tests for canonical name matching.

use fixtable_bind::{canonicalize, matches};
use proptest::prelude::*;

#[test]
fn script_names_match_member_names() {
    assert!(matches("Secret Report #2", "secretreport2"));
    assert!(matches("Account-Name", "account_name"));
    assert!(!matches("amoutn", "amount"));
}

proptest! {
    #[test]
    fn canonicalize_is_idempotent(name in "\\PC{0,40}") {
        let once = canonicalize(&name);
        prop_assert_eq!(canonicalize(&once), once.clone());
    }

    #[test]
    fn canonical_form_is_lowercase_ascii_alphanumeric(name in "\\PC{0,40}") {
        let canonical = canonicalize(&name);
        prop_assert!(canonical
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn punctuation_case_and_spacing_are_ignored(
        words in prop::collection::vec("[a-zA-Z0-9]{1,8}", 1..5),
        sep in "[ _#.:-]{0,2}",
    ) {
        let spaced = words.join(&sep);
        let joined: String = words.concat().to_ascii_lowercase();
        prop_assert!(matches(&spaced, &joined));
        prop_assert!(matches(&spaced.to_ascii_uppercase(), &joined));
    }
}
