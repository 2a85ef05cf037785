//! Marketplace catalog core for Lapak.
//!
//! - **Variants**: seller-defined option types, cartesian combination
//!   generation that keeps edited rows across regeneration, and exact-match
//!   resolution of a buyer's selection to price and stock
//! - **Recommendations**: history-biased product picks that fall back to a
//!   popularity/newness list
//! - **Catalog** and **Cart**: the product, category and cart types those
//!   operate on
//!
//! # Example
//!
//! ```
//! use lapak_commerce::prelude::*;
//!
//! let types = vec![
//!     VariantType::with_values("Warna", ["Merah", "Biru"]),
//!     VariantType::with_values("Ukuran", ["S", "M"]),
//! ];
//! let mut combinations = generate(&types, &[]);
//! assert_eq!(combinations.len(), 4);
//!
//! combinations[0].price = Money::idr(50000);
//! combinations[0].stock = 10;
//!
//! let product = Product::new(StoreId::new("str_1"), "Kaos Polos", Money::idr(100000), 5);
//! let selected = SelectedVariants::new().with("Warna", "Merah").with("Ukuran", "S");
//! let offer = resolve(&product, &combinations, &selected);
//! assert_eq!(offer.price, Money::idr(50000));
//! assert_eq!(offer.stock, 10);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod recommend;
pub mod variants;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::catalog::{Category, Product, ProductStatus};

    pub use crate::variants::{
        available_values, generate, initial_selection, resolve, CombinationGenerator,
        CombinationKey, CombinationUpdate, ProductPayload, ResolvedOffer, SelectedVariants,
        VariantCombination, VariantDraft, VariantIndex, VariantType, VariantValue,
    };

    pub use crate::recommend::{
        CategoryView, HistorySource, InMemoryHistory, NoHistory, RecommendationConfig,
        RecommendationReason, RecommendationSelector, Recommendations,
    };

    pub use crate::cart::{Cart, LineItem};
}
