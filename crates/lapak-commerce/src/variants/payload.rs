//! JSON body for the product-creation endpoint.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CategoryId, StoreId};
use crate::money::Currency;
use crate::variants::{CombinationKey, VariantDraft};
use serde::{Deserialize, Serialize};

/// The payload the seller form posts when a product is submitted.
///
/// Prices are plain integers in the currency's smallest unit; `currency`
/// names the unit once for the whole payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub store_id: StoreId,
    pub images: Vec<String>,
    /// Base price, or the lowest combination price when variants exist.
    pub price: i64,
    /// Base stock, or the summed combination stock when variants exist.
    pub stock: i64,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<VariantsPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantsPayload {
    pub types: Vec<VariantTypePayload>,
    pub combinations: Vec<CombinationPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantTypePayload {
    pub name: String,
    pub values: Vec<VariantValuePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantValuePayload {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombinationPayload {
    pub combination: CombinationKey,
    pub price: i64,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

impl ProductPayload {
    /// Build the payload, running the submit-time checks first.
    pub fn from_draft(product: &Product, draft: &VariantDraft) -> Result<Self, CommerceError> {
        if product.name.trim().is_empty() {
            return Err(CommerceError::validation("product name must not be empty"));
        }
        if product.images.is_empty() {
            return Err(CommerceError::validation("at least one product image is required"));
        }
        draft.validate_for_submit()?;

        let currency = if draft.has_variants() {
            draft.currency()
        } else {
            product.price.currency
        };
        let (price, stock, variants) = if draft.has_variants() {
            let price = draft
                .price_range()
                .map(|(min, _)| min.amount)
                .unwrap_or(product.price.amount);
            (price, draft.total_stock()?, Some(VariantsPayload::from(draft)))
        } else {
            if !product.price.is_positive() {
                return Err(CommerceError::validation("product price must be positive"));
            }
            if product.stock < 0 {
                return Err(CommerceError::InvalidQuantity(product.stock));
            }
            (product.price.amount, product.stock, None)
        };

        Ok(Self {
            name: product.name.trim().to_string(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            category_id: product.category_id.clone(),
            store_id: product.store_id.clone(),
            images: product.images.clone(),
            price,
            stock,
            currency,
            variants,
        })
    }

    pub fn to_json(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&VariantDraft> for VariantsPayload {
    fn from(draft: &VariantDraft) -> Self {
        Self {
            types: draft
                .types()
                .iter()
                .map(|t| VariantTypePayload {
                    name: t.name.clone(),
                    values: t
                        .values
                        .iter()
                        .map(|v| VariantValuePayload {
                            value: v.value.clone(),
                            image: v.image.clone(),
                        })
                        .collect(),
                })
                .collect(),
            combinations: draft
                .combinations()
                .iter()
                .map(|c| CombinationPayload {
                    combination: c.combination.clone(),
                    price: c.price.amount,
                    stock: c.stock,
                    sku: c.sku.clone(),
                })
                .collect(),
        }
    }
}
