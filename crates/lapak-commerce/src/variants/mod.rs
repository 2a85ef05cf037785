//! Product variants.
//!
//! Sellers define option axes ([`VariantType`]) with values; every element of
//! the cartesian product of those values becomes a [`VariantCombination`]
//! with its own price, stock and SKU. Buyers pick one value per axis and the
//! resolver maps that selection back to a combination's price and stock.

mod combination;
mod draft;
mod generator;
mod key;
mod option;
mod payload;
mod resolver;

pub use combination::{CombinationUpdate, VariantCombination};
pub use draft::VariantDraft;
pub use generator::{generate, CombinationGenerator};
pub use key::{CombinationKey, SelectedVariants};
pub use option::{VariantType, VariantValue};
pub use payload::{
    CombinationPayload, ProductPayload, VariantTypePayload, VariantValuePayload, VariantsPayload,
};
pub use resolver::{available_values, initial_selection, resolve, ResolvedOffer, VariantIndex};
