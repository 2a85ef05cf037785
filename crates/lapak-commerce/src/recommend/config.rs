//! Recommendation settings.

use serde::{Deserialize, Serialize};

/// Tuning for [`RecommendationSelector`](crate::recommend::RecommendationSelector),
/// read from the `[recommendations]` table of `lapak.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationConfig {
    /// Products returned when the caller doesn't ask for a count.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// How many of the viewer's top categories feed the personalized list.
    #[serde(default = "default_max_history_categories")]
    pub max_history_categories: usize,

    /// Leave out products with no stock.
    #[serde(default = "default_true")]
    pub exclude_out_of_stock: bool,

    #[serde(default)]
    pub messages: ReasonMessages,
}

fn default_limit() -> usize {
    8
}

fn default_max_history_categories() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_history_categories: default_max_history_categories(),
            exclude_out_of_stock: true,
            messages: ReasonMessages::default(),
        }
    }
}

/// Reason texts shown above the recommendation strip.
///
/// `browsing_history` may contain `{categories}`, replaced by the matched
/// category names joined with ", ".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReasonMessages {
    #[serde(default = "default_popular")]
    pub popular: String,
    #[serde(default = "default_new_arrivals")]
    pub new_arrivals: String,
    #[serde(default = "default_browsing_history")]
    pub browsing_history: String,
}

fn default_popular() -> String {
    "Popular with shoppers right now".to_string()
}

fn default_new_arrivals() -> String {
    "Fresh arrivals from our sellers".to_string()
}

fn default_browsing_history() -> String {
    "Because you browsed {categories}".to_string()
}

impl Default for ReasonMessages {
    fn default() -> Self {
        Self {
            popular: default_popular(),
            new_arrivals: default_new_arrivals(),
            browsing_history: default_browsing_history(),
        }
    }
}
