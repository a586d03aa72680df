//! Ordered parameter sets handed over by the script layer.

use std::fmt;

/// Errors raised while building a [`ParameterSet`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    #[error("parameter '{name}' appears more than once")]
    Duplicate { name: String },
}

/// An ordered sequence of `(name, value)` pairs with unique names.
///
/// Insertion order is preserved so that binding failures are reported in
/// the order the script author wrote the parameters.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, String)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from pairs, rejecting repeated names.
    ///
    /// Names are compared exactly; two names that only differ in
    /// punctuation are distinct parameters here and both bind to the member
    /// they match, the later one last.
    pub fn from_pairs<I, N, V>(pairs: I) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut set = ParameterSet::new();
        for (name, value) in pairs {
            set.insert(name, value)?;
        }
        Ok(set)
    }

    /// Append a parameter. Fails if the name is already present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ParameterError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(ParameterError::Duplicate { name });
        }
        self.entries.push((name, value.into()));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let set = ParameterSet::from_pairs([("zeta", "1"), ("alpha", "2"), ("mid", "3")]).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(set.get("alpha"), Some("2"));
        assert_eq!(set.get("beta"), None);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = ParameterSet::from_pairs([("amount", "1"), ("amount", "2")]).unwrap_err();
        assert_eq!(
            err,
            ParameterError::Duplicate {
                name: "amount".to_string()
            }
        );
    }

    #[test]
    fn debug_renders_as_map() {
        let set = ParameterSet::from_pairs([("a", "1")]).unwrap();
        assert_eq!(format!("{:?}", set), r#"{"a": "1"}"#);
    }
}
