// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod product;
pub mod search_result;
pub mod stats;

pub use product::Product;
pub use search_result::SearchHit;
pub use stats::CoverageStats;
