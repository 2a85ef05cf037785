//! Listing files: a product with its variant types and combination rows,
//! as a seller would fill in the product form.
//!
//! ```toml
//! [product]
//! name = "Kaos Polos"
//! price = 100000
//! stock = 5
//! images = ["https://cdn.example/kaos.jpg"]
//!
//! [[types]]
//! name = "Warna"
//! values = ["Merah", "Biru"]
//!
//! [[combinations]]
//! combination = { Warna = "Merah" }
//! price = 50000
//! stock = 10
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use lapak_commerce::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub product: ListingProduct,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<ListingType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combinations: Vec<ListingCombination>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingProduct {
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingType {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingCombination {
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    // Last so TOML output keeps the scalar fields ahead of this table.
    pub combination: CombinationKey,
}

/// A listing turned into catalog types.
pub struct LoadedListing {
    pub product: Product,
    pub draft: VariantDraft,
    /// Combination rows whose key matches no generated combination.
    pub unmatched: Vec<CombinationKey>,
}

impl Listing {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read listing: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON listing: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML listing: {}", path.display()))
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write listing: {}", path.display()))
    }

    /// Capture a product and its draft so it can be written back out.
    pub fn from_draft(product: &Product, draft: &VariantDraft) -> Self {
        Self {
            product: ListingProduct {
                name: product.name.clone(),
                price: product.price.amount,
                stock: product.stock,
                images: product.images.clone(),
                description: product.description.clone(),
                category_id: product.category_id.as_ref().map(ToString::to_string),
                store_id: Some(product.store_id.to_string()),
            },
            types: draft
                .types()
                .iter()
                .map(|t| ListingType {
                    name: t.name.clone(),
                    values: t.value_names().map(str::to_string).collect(),
                })
                .collect(),
            combinations: draft
                .combinations()
                .iter()
                .map(|c| ListingCombination {
                    combination: c.combination.clone(),
                    price: c.price.amount,
                    stock: c.stock,
                    sku: c.sku.clone(),
                })
                .collect(),
        }
    }

    /// Build the product and variant draft. Types and values go through the
    /// draft's checks, then each combination row is applied to the generated
    /// row with the same key.
    pub fn into_catalog(
        self,
        currency: Currency,
        default_store: Option<&str>,
    ) -> Result<LoadedListing> {
        let store = self
            .product
            .store_id
            .as_deref()
            .or(default_store)
            .unwrap_or("str_local");

        let mut product = Product::new(
            StoreId::new(store),
            self.product.name,
            Money::new(self.product.price, currency),
            self.product.stock,
        );
        product.images = self.product.images;
        product.description = self.product.description;
        product.category_id = self.product.category_id.map(CategoryId::new);

        let mut draft = VariantDraft::new(currency);
        for ty in &self.types {
            let type_id = draft
                .add_type(&ty.name)
                .with_context(|| format!("Invalid variant type '{}'", ty.name))?;
            for value in &ty.values {
                draft
                    .add_value(&type_id, value)
                    .with_context(|| format!("Invalid value '{}' for '{}'", value, ty.name))?;
            }
        }

        let mut unmatched = Vec::new();
        for row in self.combinations {
            // Names in the draft are trimmed; match rows the same way.
            let key: CombinationKey = row
                .combination
                .iter()
                .map(|(type_name, value)| (type_name.trim(), value.trim()))
                .collect();
            let Some(id) = draft
                .combinations()
                .iter()
                .find(|c| c.combination == key)
                .map(|c| c.id.clone())
            else {
                unmatched.push(key);
                continue;
            };

            let update = CombinationUpdate {
                price: Some(Money::new(row.price, currency)),
                stock: Some(row.stock),
                sku: row.sku,
            };
            draft
                .update_combination(&id, &update)
                .with_context(|| format!("Invalid combination row {}", key))?;
        }

        Ok(LoadedListing {
            product,
            draft,
            unmatched,
        })
    }
}
