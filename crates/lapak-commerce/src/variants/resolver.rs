//! Resolving a buyer's selection to a price and stock.

use crate::catalog::Product;
use crate::ids::CombinationId;
use crate::money::Money;
use crate::variants::{CombinationKey, SelectedVariants, VariantCombination, VariantType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The price and stock a product page shows for the current selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedOffer {
    pub price: Money,
    pub stock: i64,
    /// The matched combination; `None` when the base product values apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combination_id: Option<CombinationId>,
}

impl ResolvedOffer {
    pub fn from_product(product: &Product) -> Self {
        Self {
            price: product.price,
            stock: product.stock,
            combination_id: None,
        }
    }

    pub fn from_combination(combination: &VariantCombination) -> Self {
        Self {
            price: combination.price,
            stock: combination.stock,
            combination_id: Some(combination.id.clone()),
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether a combination matched the selection.
    pub fn is_variant(&self) -> bool {
        self.combination_id.is_some()
    }
}

/// Hash index over a combination list, keyed by combination key.
#[derive(Debug)]
pub struct VariantIndex<'a> {
    combinations: &'a [VariantCombination],
    by_key: HashMap<&'a CombinationKey, usize>,
}

impl<'a> VariantIndex<'a> {
    pub fn new(combinations: &'a [VariantCombination]) -> Self {
        let mut by_key = HashMap::with_capacity(combinations.len());
        for (i, combo) in combinations.iter().enumerate() {
            by_key.entry(&combo.combination).or_insert(i);
        }
        Self {
            combinations,
            by_key,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// The combination whose key equals `selected` exactly.
    ///
    /// A partial selection, or one naming types the combinations don't have,
    /// matches nothing.
    pub fn lookup(&self, selected: &SelectedVariants) -> Option<&'a VariantCombination> {
        self.by_key.get(selected).map(|&i| &self.combinations[i])
    }

    /// Price and stock for `selected`, or the product's base values.
    pub fn resolve(&self, product: &Product, selected: &SelectedVariants) -> ResolvedOffer {
        match self.lookup(selected) {
            Some(combo) => ResolvedOffer::from_combination(combo),
            None => ResolvedOffer::from_product(product),
        }
    }
}

/// Resolve `selected` against `combinations`, falling back to the product's
/// base price and stock when nothing matches exactly.
pub fn resolve(
    product: &Product,
    combinations: &[VariantCombination],
    selected: &SelectedVariants,
) -> ResolvedOffer {
    if combinations.is_empty() {
        return ResolvedOffer::from_product(product);
    }
    VariantIndex::new(combinations).resolve(product, selected)
}

/// The selection a product page starts with: the first combination's key,
/// or nothing when there are no combinations.
pub fn initial_selection(combinations: &[VariantCombination]) -> SelectedVariants {
    combinations
        .first()
        .map(|c| c.combination.clone())
        .unwrap_or_default()
}

/// Values of `type_name` that lead to an in-stock combination, given the
/// buyer's picks for the other types. Returned in the type's value order.
pub fn available_values<'t>(
    types: &'t [VariantType],
    combinations: &[VariantCombination],
    selected: &SelectedVariants,
    type_name: &str,
) -> Vec<&'t str> {
    let Some(ty) = types.iter().find(|t| t.name == type_name) else {
        return Vec::new();
    };

    let compatible = |combo: &VariantCombination, value: &str| {
        combo.is_in_stock()
            && combo.combination.get(type_name) == Some(value)
            && selected
                .iter()
                .filter(|(name, _)| *name != type_name)
                .all(|(name, picked)| combo.combination.get(name) == Some(picked))
    };

    ty.value_names()
        .filter(|value| combinations.iter().any(|c| compatible(c, *value)))
        .collect()
}
