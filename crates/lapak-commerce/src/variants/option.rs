//! Variant types and values.

use crate::ids::{VariantTypeId, VariantValueId};
use serde::{Deserialize, Serialize};

/// One option axis of a product, e.g. "Warna" or "Ukuran".
///
/// Values keep the order they were added in; that order drives combination
/// order and is visible in the seller's table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantType {
    pub id: VariantTypeId,
    pub name: String,
    #[serde(default)]
    pub values: Vec<VariantValue>,
}

impl VariantType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: VariantTypeId::generate(),
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Build a type with the given values, in order.
    pub fn with_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ty = Self::new(name);
        for value in values {
            ty.push_value(value);
        }
        ty
    }

    /// Append a value without any duplicate check and return its id.
    pub fn push_value(&mut self, value: impl Into<String>) -> VariantValueId {
        let value = VariantValue::new(value);
        let id = value.id.clone();
        self.values.push(value);
        id
    }

    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.value == value)
    }

    pub fn value(&self, id: &VariantValueId) -> Option<&VariantValue> {
        self.values.iter().find(|v| &v.id == id)
    }

    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.value.as_str())
    }
}

/// One concrete choice within a variant type, e.g. "Merah".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantValue {
    pub id: VariantValueId,
    pub value: String,
    /// Optional swatch or photo URL for this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl VariantValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: VariantValueId::generate(),
            value: value.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_values_keeps_order() {
        let ty = VariantType::with_values("Ukuran", ["S", "M", "L"]);
        assert_eq!(ty.value_names().collect::<Vec<_>>(), ["S", "M", "L"]);
        assert!(ty.has_value("M"));
        assert!(!ty.has_value("XL"));
    }

    #[test]
    fn test_value_lookup_by_id() {
        let mut ty = VariantType::new("Warna");
        let id = ty.push_value("Merah");
        assert_eq!(ty.value(&id).map(|v| v.value.as_str()), Some("Merah"));
    }
}
