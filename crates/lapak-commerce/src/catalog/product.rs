//! Product types.

use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId, StoreId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Product status in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Still being authored by the seller, not visible to buyers.
    Draft,
    /// Listed and visible.
    #[default]
    Active,
    /// Delisted, data preserved.
    Archived,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Active => "active",
            ProductStatus::Archived => "archived",
        }
    }
}

impl FromStr for ProductStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(ProductStatus::Draft),
            "active" => Ok(ProductStatus::Active),
            "archived" => Ok(ProductStatus::Archived),
            other => Err(CommerceError::validation(format!(
                "unknown product status '{other}'"
            ))),
        }
    }
}

/// A product listed by a store.
///
/// `price` and `stock` are the base values shown when the product has no
/// variant combinations, or when the buyer's selection matches none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    /// Store (seller) that owns the listing.
    pub store_id: StoreId,
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// Base price.
    pub price: Money,
    /// Base stock.
    pub stock: i64,
    /// Image URLs, first one is the cover.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: ProductStatus,
    /// Units sold so far, used for popularity ordering.
    #[serde(default)]
    pub sold_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create an active product with a slug derived from the name.
    pub fn new(store_id: StoreId, name: impl Into<String>, price: Money, stock: i64) -> Self {
        let name = name.into();
        Self {
            id: ProductId::generate(),
            store_id,
            slug: slugify(&name),
            name,
            description: None,
            category_id: None,
            price,
            stock,
            images: Vec::new(),
            status: ProductStatus::Active,
            sold_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Visible to buyers.
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Active
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn in_category(&self, category_id: &CategoryId) -> bool {
        self.category_id.as_ref() == Some(category_id)
    }
}

/// Lowercase ASCII slug: alphanumerics kept, everything else collapsed to `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
