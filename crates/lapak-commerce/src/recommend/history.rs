//! Viewer browsing history.

use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One product page view, keyed by the product's category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryView {
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub viewed_at: DateTime<Utc>,
}

impl CategoryView {
    pub fn new(category_id: CategoryId, viewed_at: DateTime<Utc>) -> Self {
        Self {
            category_id,
            product_id: None,
            viewed_at,
        }
    }

    pub fn of_product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }
}

/// Where the selector reads a viewer's history from.
pub trait HistorySource {
    fn category_views(&self, viewer: &UserId) -> Result<Vec<CategoryView>, CommerceError>;
}

impl<T: HistorySource + ?Sized> HistorySource for &T {
    fn category_views(&self, viewer: &UserId) -> Result<Vec<CategoryView>, CommerceError> {
        (**self).category_views(viewer)
    }
}

/// A source with no history for anyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl HistorySource for NoHistory {
    fn category_views(&self, _viewer: &UserId) -> Result<Vec<CategoryView>, CommerceError> {
        Ok(Vec::new())
    }
}

/// History held in memory, as loaded from a fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct InMemoryHistory {
    views: HashMap<UserId, Vec<CategoryView>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, viewer: UserId, view: CategoryView) {
        self.views.entry(viewer).or_default().push(view);
    }

    pub fn viewers(&self) -> impl Iterator<Item = &UserId> {
        self.views.keys()
    }
}

impl HistorySource for InMemoryHistory {
    fn category_views(&self, viewer: &UserId) -> Result<Vec<CategoryView>, CommerceError> {
        Ok(self.views.get(viewer).cloned().unwrap_or_default())
    }
}

/// Categories ordered by view count, ties broken by the most recent view,
/// then by id. At most `max` are returned.
pub fn rank_categories(views: &[CategoryView], max: usize) -> Vec<CategoryId> {
    let mut stats: HashMap<&CategoryId, (usize, DateTime<Utc>)> = HashMap::new();
    for view in views {
        let entry = stats
            .entry(&view.category_id)
            .or_insert((0, view.viewed_at));
        entry.0 += 1;
        entry.1 = entry.1.max(view.viewed_at);
    }

    let mut ranked: Vec<_> = stats.into_iter().collect();
    ranked.sort_by(|(a_id, (a_count, a_last)), (b_id, (b_count, b_last))| {
        b_count
            .cmp(a_count)
            .then(b_last.cmp(a_last))
            .then(a_id.cmp(b_id))
    });
    ranked
        .into_iter()
        .take(max)
        .map(|(id, _)| id.clone())
        .collect()
}
