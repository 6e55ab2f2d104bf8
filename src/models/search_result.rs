// file: src/models/search_result.rs
// description: Search hit model with relevance scores
// reference: Used for prefix search results

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Document `_id`
    pub id: String,

    /// Normalized product name
    pub name: String,

    /// Normalized product category
    pub category: String,

    /// Relevance score assigned by the search engine (higher is better)
    pub score: f64,
}

impl SearchHit {
    pub fn new(id: String, name: String, category: String, score: f64) -> Self {
        Self {
            id,
            name,
            category,
            score,
        }
    }

    /// Format as a one-line summary for display
    pub fn format_summary(&self) -> String {
        format!(
            "Score: {:.4} | {} [{}] ({})",
            self.score, self.name, self.category, self.id
        )
    }
}
