//! Canonical name matching.
//!
//! Script authors write names the way they read (`"Secret Report #2"`),
//! code declares them the way it compiles (`secret_report_2`). Both are
//! reduced to lower-case ASCII letters and digits before comparison.

/// Strip every character that is not an ASCII letter or digit and
/// lower-case the rest.
///
/// Idempotent: canonicalizing a canonical name returns it unchanged.
pub fn canonicalize(name: &str) -> String {
    canonical_chars(name).collect()
}

/// True when both names have the same canonical form.
pub fn matches(parameter_name: &str, member_name: &str) -> bool {
    canonical_chars(parameter_name).eq(canonical_chars(member_name))
}

fn canonical_chars(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
