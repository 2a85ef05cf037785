//! Combination keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The option map identifying a combination: variant type name -> value.
///
/// Backed by an ordered map so equality and hashing are structural: two keys
/// are equal exactly when they hold the same names with the same values,
/// regardless of the order options were picked in. That makes the key usable
/// directly as a `HashMap` key for O(1) resolver lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinationKey(BTreeMap<String, String>);

/// A buyer's current option picks. Same shape as a combination key; it
/// matches a combination only when the two are equal.
pub type SelectedVariants = CombinationKey;

impl CombinationKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::select`].
    pub fn with(mut self, type_name: impl Into<String>, value: impl Into<String>) -> Self {
        self.select(type_name, value);
        self
    }

    /// Set the value for a type, replacing any earlier pick for that type.
    pub fn select(&mut self, type_name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(type_name.into(), value.into());
    }

    /// Clear the pick for a type, returning the previous value.
    pub fn deselect(&mut self, type_name: &str) -> Option<String> {
        self.0.remove(type_name)
    }

    pub fn get(&self, type_name: &str) -> Option<&str> {
        self.0.get(type_name).map(String::as_str)
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.0.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(type name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Move a value from one type name to another (type rename).
    pub(crate) fn rename_type(&mut self, from: &str, to: &str) {
        if let Some(value) = self.0.remove(from) {
            self.0.insert(to.to_string(), value);
        }
    }

    /// Replace `from` with `to` under `type_name`, if that is the current value.
    pub(crate) fn rename_value(&mut self, type_name: &str, from: &str, to: &str) {
        if let Some(value) = self.0.get_mut(type_name) {
            if value == from {
                *value = to.to_string();
            }
        }
    }

    /// Sorted `name=value` pairs joined with `;`, e.g. `Ukuran=S;Warna=Merah`.
    pub fn canonical(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl<K, V> FromIterator<(K, V)> for CombinationKey
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_pick_order() {
        let a = CombinationKey::new().with("Warna", "Merah").with("Ukuran", "S");
        let b = CombinationKey::new().with("Ukuran", "S").with("Warna", "Merah");
        assert_eq!(a, b);
        assert_eq!(a.canonical(), "Ukuran=S;Warna=Merah");
    }

    #[test]
    fn test_subset_is_not_equal() {
        let full = CombinationKey::new().with("Warna", "Merah").with("Ukuran", "S");
        let partial = CombinationKey::new().with("Warna", "Merah");
        assert_ne!(full, partial);
    }

    #[test]
    fn test_select_replaces_previous_pick() {
        let mut selected = SelectedVariants::new();
        selected.select("Warna", "Merah");
        selected.select("Warna", "Biru");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.get("Warna"), Some("Biru"));
        assert_eq!(selected.deselect("Warna").as_deref(), Some("Biru"));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_serializes_as_object() {
        let key: CombinationKey = [("Warna", "Merah"), ("Ukuran", "S")].into_iter().collect();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"{"Ukuran":"S","Warna":"Merah"}"#);
        let back: CombinationKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_rename_helpers() {
        let mut key = CombinationKey::new().with("Warna", "Merah");
        key.rename_type("Warna", "Color");
        key.rename_value("Color", "Merah", "Red");
        key.rename_value("Color", "Biru", "Blue");
        assert_eq!(key, CombinationKey::new().with("Color", "Red"));
    }
}
