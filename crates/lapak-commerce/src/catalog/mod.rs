//! Product catalog module.
//!
//! Contains the product and category types the variant and recommendation
//! logic operate on.

mod category;
mod product;

pub use category::Category;
pub use product::{slugify, Product, ProductStatus};
