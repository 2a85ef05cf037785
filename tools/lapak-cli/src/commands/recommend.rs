//! Recommendation command.

use std::path::Path;

use anyhow::{Context as _, Result};
use lapak_commerce::prelude::*;
use serde::{Deserialize, Serialize};

use super::RecommendArgs;
use crate::context::Context;
use crate::output::{column_widths, stock_badge};

/// Catalog fixture: the categories and products to pick from.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Serialize)]
struct RecommendReport<'a> {
    viewer: Option<&'a UserId>,
    message: String,
    #[serde(flatten)]
    recommendations: &'a Recommendations,
}

/// Run the recommend command.
pub fn run(args: RecommendArgs, ctx: &Context) -> Result<()> {
    let catalog: CatalogFile = read_json(&ctx.resolve_path(&args.catalog))?;
    let history: InMemoryHistory = match &args.history {
        Some(path) => read_json(&ctx.resolve_path(path))?,
        None => InMemoryHistory::new(),
    };
    ctx.output.debug(&format!(
        "{} products, {} categories, {} viewers with history",
        catalog.products.len(),
        catalog.categories.len(),
        history.viewers().count()
    ));

    let viewer = args.viewer.map(UserId::new);
    let selector = RecommendationSelector::new(
        &catalog.products,
        &history,
        ctx.config.recommendations.clone(),
    );
    let recommendations = match args.limit {
        Some(limit) => selector.get_recommendations(viewer.as_ref(), limit),
        None => selector.recommend(viewer.as_ref()),
    };
    let message = recommendations
        .reason
        .message(selector.config(), &catalog.categories);

    if ctx.output.is_json() {
        ctx.output.json(&RecommendReport {
            viewer: viewer.as_ref(),
            message,
            recommendations: &recommendations,
        });
        return Ok(());
    }

    ctx.output.header(&message);
    if recommendations.products.is_empty() {
        ctx.output.info("Nothing to recommend.");
        return Ok(());
    }

    let header = ["Product", "Category", "Price", "Stock", "Sold"];
    let rows: Vec<Vec<String>> = recommendations
        .products
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.category_id
                    .as_ref()
                    .map(|id| Category::name_of(&catalog.categories, id))
                    .unwrap_or_else(|| "-".to_string()),
                p.price.display(),
                stock_badge(p.stock),
                p.sold_count.to_string(),
            ]
        })
        .collect();

    let widths = column_widths(&header, &rows);
    ctx.output.table_row(&header, &widths);
    for row in &rows {
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &widths);
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
