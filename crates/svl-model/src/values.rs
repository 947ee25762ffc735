//! Option-name to option-value assignments.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::ids::ContentHash;

/// Sparse assignment of values to shader options.
///
/// A missing key means the option is left unconstrained. Iteration order is
/// unspecified; equality and [`OptionValues::content_hash`] do not depend on
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValues(HashMap<String, String>);

impl OptionValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity(capacity))
    }

    /// Sets `name` to `value`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Pairs ordered by option name.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs
    }

    /// Digest of the mapping's content.
    ///
    /// Pairs are fed in key order with length prefixes, so two mappings with
    /// the same pairs hash identically no matter how they were built.
    pub fn content_hash(&self) -> ContentHash {
        let mut hasher = Sha256::new();
        hasher.update((self.0.len() as u64).to_le_bytes());
        for (name, value) in self.sorted() {
            hasher.update((name.len() as u64).to_le_bytes());
            hasher.update(name.as_bytes());
            hasher.update((value.len() as u64).to_le_bytes());
            hasher.update(value.as_bytes());
        }
        ContentHash::from_sha256(hasher.finalize().into())
    }
}

impl<K, V> FromIterator<(K, V)> for OptionValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl Serialize for OptionValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Sorted so saved documents are stable across runs.
        let ordered: BTreeMap<&str, &str> = self.iter().collect();
        ordered.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OptionValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        HashMap::<String, String>::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_ignores_insertion_order() {
        let a: OptionValues = [("o_fog", "True"), ("o_shadow", "False"), ("o_brdf", "Burley")]
            .into_iter()
            .collect();
        let mut b = OptionValues::new();
        b.insert("o_brdf", "Burley");
        b.insert("o_shadow", "False");
        b.insert("o_fog", "True");
        assert_eq!(a, b);
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn hash_separates_shifted_boundaries() {
        let a: OptionValues = [("ab", "c")].into_iter().collect();
        let b: OptionValues = [("a", "bc")].into_iter().collect();
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn serializes_in_key_order() {
        let values: OptionValues = [("o_z", "1"), ("o_a", "0")].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&values).unwrap(),
            r#"{"o_a":"0","o_z":"1"}"#
        );
    }
}
