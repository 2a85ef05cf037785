//! CLI configuration.

use anyhow::{Context, Result};
use lapak_commerce::money::Currency;
use lapak_commerce::recommend::RecommendationConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file (`lapak.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Catalog defaults.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Recommendation selector settings.
    #[serde(default)]
    pub recommendations: RecommendationConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Catalog defaults applied to listings that don't say otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Currency for prices in listing files.
    #[serde(default)]
    pub currency: Currency,

    /// Store that owns listings without a `store_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

/// Generate a default lapak.toml config file.
pub fn generate_default_config() -> String {
    r#"# Lapak catalog tooling configuration

[catalog]
currency = "IDR"
# store_id = "str_myshop"

[recommendations]
default_limit = 8
max_history_categories = 3
exclude_out_of_stock = true

[recommendations.messages]
popular = "Popular with shoppers right now"
new_arrivals = "Fresh arrivals from our sellers"
browsing_history = "Because you browsed {categories}"
"#
    .to_string()
}
