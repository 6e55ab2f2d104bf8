// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod search;
pub mod utils;

pub use config::{CatalogConfig, Config, EvaluationConfig, SearchConfig};
pub use error::{PipelineError, Result};
pub use exporter::JsonExporter;
pub use models::{CoverageStats, Product, SearchHit};
pub use parser::{CatalogLoader, LoadReport, LoadedCatalog, QueryReader, TextNormalizer, TypoCorrector};
pub use pipeline::{EvaluationReport, PipelineOrchestrator, ProgressTracker, QueryEvaluator, RunStats};
pub use search::{BulkInserter, InsertStats, SchemaManager, SearchClient, build_prefix_query};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _normalizer = TextNormalizer::new();
        let _corrector = TypoCorrector::new();
    }
}
