//! Recommendation selection.

use crate::catalog::{Category, Product};
use crate::ids::{CategoryId, ProductId, UserId};
use crate::recommend::{rank_categories, HistorySource, RecommendationConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Which heuristic produced a recommendation list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationReason {
    /// Generic list, ordered by units sold.
    Popular,
    /// Generic list when nothing has sold yet, so newest first.
    NewArrivals,
    /// Biased toward the categories the viewer browsed.
    BrowsingHistory { categories: Vec<CategoryId> },
    /// History lookup failed; generic list served instead.
    HistoryUnavailable,
}

impl RecommendationReason {
    /// Human-readable text. A degraded list reads the same as the generic one.
    pub fn message(&self, config: &RecommendationConfig, categories: &[Category]) -> String {
        let messages = &config.messages;
        match self {
            RecommendationReason::Popular | RecommendationReason::HistoryUnavailable => {
                messages.popular.clone()
            }
            RecommendationReason::NewArrivals => messages.new_arrivals.clone(),
            RecommendationReason::BrowsingHistory { categories: ids } => {
                let names = ids
                    .iter()
                    .map(|id| Category::name_of(categories, id))
                    .collect::<Vec<_>>()
                    .join(", ");
                messages.browsing_history.replace("{categories}", &names)
            }
        }
    }

    pub fn is_personalized(&self) -> bool {
        matches!(self, RecommendationReason::BrowsingHistory { .. })
    }
}

/// A recommendation list and why it was chosen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    pub products: Vec<Product>,
    pub reason: RecommendationReason,
}

/// Picks products for the "you may also like" strip.
///
/// Never fails: history errors are logged and the generic list is served.
pub struct RecommendationSelector<'a, H> {
    catalog: &'a [Product],
    history: H,
    config: RecommendationConfig,
}

impl<'a, H: HistorySource> RecommendationSelector<'a, H> {
    pub fn new(catalog: &'a [Product], history: H, config: RecommendationConfig) -> Self {
        Self {
            catalog,
            history,
            config,
        }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Recommendations using the configured default limit.
    pub fn recommend(&self, viewer: Option<&UserId>) -> Recommendations {
        self.get_recommendations(viewer, self.config.default_limit)
    }

    pub fn get_recommendations(&self, viewer: Option<&UserId>, limit: usize) -> Recommendations {
        let recommendations = match viewer {
            None => self.generic(limit, self.generic_reason()),
            Some(viewer) => self.personalized(viewer, limit),
        };
        debug!(
            viewer = viewer.map(UserId::as_str),
            limit,
            returned = recommendations.products.len(),
            reason = ?recommendations.reason,
            "selected recommendations"
        );
        recommendations
    }

    fn personalized(&self, viewer: &UserId, limit: usize) -> Recommendations {
        let views = match self.history.category_views(viewer) {
            Ok(views) => views,
            Err(err) => {
                warn!(
                    viewer = %viewer,
                    error = %err,
                    "history unavailable, serving generic recommendations"
                );
                return self.generic(limit, RecommendationReason::HistoryUnavailable);
            }
        };

        let ranked = rank_categories(&views, self.config.max_history_categories);
        let seen: HashSet<&ProductId> = views
            .iter()
            .filter_map(|v| v.product_id.as_ref())
            .collect();

        let eligible = self.eligible_sorted();
        let mut picked: Vec<&Product> = Vec::new();
        let mut matched: Vec<CategoryId> = Vec::new();
        for category in &ranked {
            if picked.len() >= limit {
                break;
            }
            let before = picked.len();
            picked.extend(
                eligible
                    .iter()
                    .copied()
                    .filter(|p| p.in_category(category) && !seen.contains(&p.id))
                    .take(limit - before),
            );
            if picked.len() > before {
                matched.push(category.clone());
            }
        }

        if matched.is_empty() {
            return self.generic(limit, self.generic_reason());
        }

        let chosen: HashSet<&ProductId> = picked.iter().map(|p| &p.id).collect();
        let fill: Vec<&Product> = eligible
            .iter()
            .copied()
            .filter(|p| !chosen.contains(&p.id))
            .take(limit - picked.len())
            .collect();
        picked.extend(fill);

        Recommendations {
            products: picked.into_iter().cloned().collect(),
            reason: RecommendationReason::BrowsingHistory {
                categories: matched,
            },
        }
    }

    fn generic(&self, limit: usize, reason: RecommendationReason) -> Recommendations {
        Recommendations {
            products: self
                .eligible_sorted()
                .into_iter()
                .take(limit)
                .cloned()
                .collect(),
            reason,
        }
    }

    fn generic_reason(&self) -> RecommendationReason {
        if self.eligible().any(|p| p.sold_count > 0) {
            RecommendationReason::Popular
        } else {
            RecommendationReason::NewArrivals
        }
    }

    fn eligible(&self) -> impl Iterator<Item = &'a Product> + '_ {
        let include_sold_out = !self.config.exclude_out_of_stock;
        self.catalog
            .iter()
            .filter(move |p| p.is_available() && (include_sold_out || p.is_in_stock()))
    }

    /// Eligible products by units sold, then newest, then id.
    fn eligible_sorted(&self) -> Vec<&'a Product> {
        let mut products: Vec<&Product> = self.eligible().collect();
        products.sort_by(|a, b| {
            b.sold_count
                .cmp(&a.sold_count)
                .then(b.created_at.cmp(&a.created_at))
                .then(a.id.cmp(&b.id))
        });
        products
    }
}
