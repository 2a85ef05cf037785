//! Combination generation.
//!
//! The generator never fails: an empty type list, or any type without
//! values, yields an empty combination set, which callers treat as an
//! incomplete draft rather than an error.

use crate::money::Currency;
use crate::variants::{CombinationKey, VariantCombination, VariantType};
use std::collections::HashMap;
use tracing::debug;

/// Builds the cartesian product of variant values and merges it with the
/// previously generated combinations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinationGenerator {
    currency: Currency,
}

impl CombinationGenerator {
    /// Fresh combinations are priced at zero in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Generate one combination per element of the cartesian product of
    /// `types`' values, in type order then value order.
    ///
    /// Each fresh combination is swapped for the entry in `existing` with an
    /// equal key, if any, so seller-entered id/price/stock/SKU survive edits.
    /// Entries of `existing` with no counterpart are dropped.
    pub fn generate(
        &self,
        types: &[VariantType],
        existing: &[VariantCombination],
    ) -> Vec<VariantCombination> {
        let keys = cartesian_keys(types);

        // First occurrence wins when `existing` holds duplicate keys.
        let mut previous: HashMap<&CombinationKey, &VariantCombination> =
            HashMap::with_capacity(existing.len());
        for combo in existing {
            previous.entry(&combo.combination).or_insert(combo);
        }

        let mut preserved = 0usize;
        let combinations: Vec<VariantCombination> = keys
            .into_iter()
            .map(|key| match previous.get(&key) {
                Some(prev) => {
                    preserved += 1;
                    (*prev).clone()
                }
                None => VariantCombination::new(key, self.currency),
            })
            .collect();

        debug!(
            types = types.len(),
            combinations = combinations.len(),
            preserved,
            dropped = existing.len().saturating_sub(preserved),
            "generated variant combinations"
        );

        combinations
    }
}

/// Generate combinations in the marketplace default currency.
pub fn generate(
    types: &[VariantType],
    existing: &[VariantCombination],
) -> Vec<VariantCombination> {
    CombinationGenerator::default().generate(types, existing)
}

fn cartesian_keys(types: &[VariantType]) -> Vec<CombinationKey> {
    if types.is_empty() || types.iter().any(|t| t.values.is_empty()) {
        return Vec::new();
    }

    let capacity = types
        .iter()
        .try_fold(1usize, |acc, t| acc.checked_mul(t.values.len()))
        .unwrap_or(0);
    let mut keys = Vec::with_capacity(capacity);
    expand(types, CombinationKey::new(), &mut keys);
    keys
}

fn expand(remaining: &[VariantType], partial: CombinationKey, out: &mut Vec<CombinationKey>) {
    match remaining.split_first() {
        None => out.push(partial),
        Some((first, rest)) => {
            for value in &first.values {
                expand(rest, partial.clone().with(&first.name, &value.value), out);
            }
        }
    }
}
