//! Shopping cart module.
//!
//! The buyer page adds the offer the resolver produced; the line keeps the
//! matched combination id so the order knows which variant was bought.

mod cart;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
