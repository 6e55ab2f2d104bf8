// file: src/search/mod.rs
// description: search engine operations module exports
// reference: internal module structure

pub mod client;
pub mod insert;
pub mod query;
pub mod schema;

pub use client::{BulkItem, BulkResponse, SearchClient};
pub use insert::{BulkInserter, InsertStats};
pub use query::{FieldWeight, PREFIX_FIELDS, build_prefix_query};
pub use schema::SchemaManager;
