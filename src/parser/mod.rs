// file: src/parser/mod.rs
// description: catalog, query and text parsing module exports
// reference: internal module structure

pub mod catalog;
pub mod normalizer;
pub mod patterns;
pub mod queries;
pub mod typos;

pub use catalog::{CatalogLoader, LoadReport, LoadedCatalog};
pub use normalizer::TextNormalizer;
pub use queries::QueryReader;
pub use typos::TypoCorrector;
