// file: src/models/product.rs
// description: normalized catalog product as submitted to the search index
// reference: https://docs.rs/serde

use serde::{Deserialize, Serialize};

/// One catalog product after normalization.
///
/// `id` is used as the document `_id` and is not part of the indexed source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub keywords: String,
    pub weight: String,
    pub package_size: String,
    pub price: f64,
}
