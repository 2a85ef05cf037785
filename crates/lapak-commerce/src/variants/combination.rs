//! Variant combinations.

use crate::error::CommerceError;
use crate::ids::CombinationId;
use crate::money::{Currency, Money};
use crate::variants::{CombinationKey, VariantType};
use serde::{Deserialize, Serialize};

/// One cartesian-product tuple across all variant types, with its own price,
/// stock and SKU.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantCombination {
    pub id: CombinationId,
    pub combination: CombinationKey,
    pub price: Money,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

impl VariantCombination {
    /// A freshly generated combination: zero price, zero stock, no SKU.
    pub fn new(combination: CombinationKey, currency: Currency) -> Self {
        Self {
            id: CombinationId::generate(),
            combination,
            price: Money::zero(currency),
            stock: 0,
            sku: None,
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Values in variant type order, e.g. `Merah / S`.
    ///
    /// Types missing from the key are skipped.
    pub fn label(&self, types: &[VariantType]) -> String {
        types
            .iter()
            .filter_map(|t| self.combination.get(&t.name))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// Apply a seller edit. Nothing is changed if any field is invalid.
    pub fn apply(&mut self, update: &CombinationUpdate) -> Result<(), CommerceError> {
        update.validate(self.price.currency)?;
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(sku) = &update.sku {
            let sku = sku.trim();
            self.sku = (!sku.is_empty()).then(|| sku.to_string());
        }
        Ok(())
    }
}

/// A partial edit to a combination row. An empty `sku` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CombinationUpdate {
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub sku: Option<String>,
}

impl CombinationUpdate {
    pub fn price(price: Money) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn stock(stock: i64) -> Self {
        Self {
            stock: Some(stock),
            ..Self::default()
        }
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    fn validate(&self, currency: Currency) -> Result<(), CommerceError> {
        if let Some(price) = self.price {
            if price.is_negative() {
                return Err(CommerceError::validation("price must not be negative"));
            }
            if price.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: price.currency.code().to_string(),
                });
            }
        }
        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(CommerceError::InvalidQuantity(stock));
            }
        }
        Ok(())
    }
}
