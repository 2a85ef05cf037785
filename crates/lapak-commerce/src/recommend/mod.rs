//! Rule-based product recommendations.
//!
//! Signed-in viewers with browsing history get products from the categories
//! they looked at most; everyone else, and anyone whose history cannot be
//! read, gets the catalog in popularity/newness order.

mod config;
mod history;
mod selector;

pub use config::{ReasonMessages, RecommendationConfig};
pub use history::{rank_categories, CategoryView, HistorySource, InMemoryHistory, NoHistory};
pub use selector::{RecommendationReason, RecommendationSelector, Recommendations};
