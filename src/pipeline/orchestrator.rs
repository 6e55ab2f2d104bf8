// file: src/pipeline/orchestrator.rs
// description: coordinates index rebuild, catalog loading, and query evaluation
// reference: sequential batch workflow against the search engine

use crate::config::Config;
use crate::error::Result;
use crate::exporter::JsonExporter;
use crate::models::SearchHit;
use crate::parser::{CatalogLoader, LoadReport, QueryReader, TextNormalizer};
use crate::pipeline::evaluator::{EvaluationReport, QueryEvaluator};
use crate::pipeline::progress::{ProgressTracker, RunStats};
use crate::search::{BulkInserter, InsertStats, SchemaManager, SearchClient};
use crate::utils::Validator;
use crate::utils::logging::format_step;
use std::time::Instant;
use tracing::{info, warn};

const TOTAL_STEPS: usize = 5;

pub struct PipelineOrchestrator {
    config: Config,
    client: SearchClient,
    show_progress: bool,
    colored: bool,
}

impl PipelineOrchestrator {
    pub fn new(config: Config) -> Result<Self> {
        let client = SearchClient::new(config.search.clone())?;

        Ok(Self {
            config,
            client,
            show_progress: true,
            colored: true,
        })
    }

    pub fn with_progress(mut self, show_progress: bool, colored: bool) -> Self {
        self.show_progress = show_progress;
        self.colored = colored;
        self
    }

    pub fn client(&self) -> &SearchClient {
        &self.client
    }

    /// Full run: connect, rebuild the index, load the catalog, evaluate the
    /// queries and write both output files.
    pub async fn run(&self) -> Result<RunStats> {
        let start_time = Instant::now();

        Validator::validate_file_path(&self.config.catalog.path)?;
        Validator::validate_file_path(&self.config.evaluation.queries_path)?;

        info!("{}", format_step(1, TOTAL_STEPS, "Connecting to search engine"));
        self.client.wait_until_ready().await?;

        info!("{}", format_step(2, TOTAL_STEPS, "Rebuilding index"));
        SchemaManager::new(&self.client).recreate().await?;

        info!("{}", format_step(3, TOTAL_STEPS, "Indexing catalog"));
        let (load_report, insert_stats) = self.load_catalog().await?;

        info!("{}", format_step(4, TOTAL_STEPS, "Evaluating queries"));
        let report = self.evaluate_queries().await?;

        info!("{}", format_step(5, TOTAL_STEPS, "Exporting results"));
        self.export(&report)?;

        let stats = RunStats {
            products_found: load_report.products_found,
            products_loaded: load_report.products_loaded,
            products_skipped: load_report.products_skipped,
            documents_indexed: insert_stats.documents_indexed,
            bulk_errors: insert_stats.errors,
            queries_total: report.stats.total_queries,
            queries_successful: report.stats.successful_searches,
            coverage_percentage: report.stats.coverage_percentage,
            duration_secs: start_time.elapsed().as_secs_f64(),
        };

        self.log_final_stats(&stats);
        Ok(stats)
    }

    /// Rebuilds the index and loads the catalog without evaluating queries.
    pub async fn index_catalog(&self) -> Result<(LoadReport, InsertStats)> {
        Validator::validate_file_path(&self.config.catalog.path)?;

        self.client.wait_until_ready().await?;
        SchemaManager::new(&self.client).recreate().await?;
        self.load_catalog().await
    }

    /// Evaluates the query file against the existing index and exports the results.
    pub async fn evaluate(&self) -> Result<EvaluationReport> {
        Validator::validate_file_path(&self.config.evaluation.queries_path)?;

        self.client.wait_until_ready().await?;

        if !SchemaManager::new(&self.client).verify().await? {
            warn!(
                "Index '{}' does not exist, every query will miss",
                self.client.index_name()
            );
        }

        let report = self.evaluate_queries().await?;
        self.export(&report)?;
        Ok(report)
    }

    /// Single ad-hoc prefix search; errors are returned rather than swallowed.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.client.wait_until_ready().await?;
        QueryEvaluator::new(&self.client, self.config.evaluation.result_size)
            .try_search_prefix(query)
            .await
    }

    async fn load_catalog(&self) -> Result<(LoadReport, InsertStats)> {
        let loader = CatalogLoader::new(TextNormalizer::new());
        let catalog = loader.load_file(&self.config.catalog.path)?;

        if catalog.products.is_empty() {
            warn!("Catalog contains no indexable products");
            return Ok((catalog.report, InsertStats::default()));
        }

        let insert_stats = BulkInserter::new(&self.client)
            .insert_products(&catalog.products)
            .await?;

        let index = self.client.index_name();
        self.client.refresh(index).await?;

        match self.client.count(index).await {
            Ok(count) => info!("Index '{}' now holds {} documents", index, count),
            Err(e) => warn!("Could not count documents in '{}': {}", index, e),
        }

        Ok((catalog.report, insert_stats))
    }

    async fn evaluate_queries(&self) -> Result<EvaluationReport> {
        let queries = QueryReader::read_file(&self.config.evaluation.queries_path)?;

        let progress = if self.show_progress {
            ProgressTracker::with_color(queries.len(), self.colored)
        } else {
            ProgressTracker::hidden()
        };

        let evaluator = QueryEvaluator::new(&self.client, self.config.evaluation.result_size);
        let report = evaluator.evaluate(&queries, &progress).await;

        if report.stats.total_queries == 0 {
            warn!("Query file is empty, coverage reported as 0.0%");
        }

        Ok(report)
    }

    fn export(&self, report: &EvaluationReport) -> Result<()> {
        let exporter = JsonExporter::new(
            &self.config.evaluation.results_path,
            &self.config.evaluation.stats_path,
        );
        exporter.export_results(&report.results)?;
        exporter.export_stats(&report.stats)
    }

    fn log_final_stats(&self, stats: &RunStats) {
        info!("=== Evaluation Summary ===");
        info!("Duration: {:.2} seconds", stats.duration_secs);
        info!(
            "Products: {} found, {} loaded, {} skipped ({:.1}%)",
            stats.products_found,
            stats.products_loaded,
            stats.products_skipped,
            stats.load_rate()
        );
        info!(
            "Documents indexed: {} ({} bulk errors)",
            stats.documents_indexed, stats.bulk_errors
        );
        info!(
            "Queries: {} total, {} with hits, {} without",
            stats.queries_total,
            stats.queries_successful,
            stats.queries_failed()
        );
        info!("Coverage: {:.1}%", stats.coverage_percentage);
        info!("Query speed: {:.2} queries/sec", stats.queries_per_second());
        info!("==========================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orchestrator_creation() {
        let orchestrator = PipelineOrchestrator::new(Config::default_config()).unwrap();
        assert_eq!(orchestrator.client().index_name(), "products");
        assert!(orchestrator.show_progress);
    }

    #[test]
    fn test_progress_can_be_disabled() {
        let orchestrator = PipelineOrchestrator::new(Config::default_config())
            .unwrap()
            .with_progress(false, false);
        assert!(!orchestrator.show_progress);
        assert!(!orchestrator.colored);
    }

    #[tokio::test]
    async fn test_run_fails_fast_on_missing_inputs() {
        let mut config = Config::default_config();
        config.catalog.path = "/nonexistent/catalog.xml".into();

        let orchestrator = PipelineOrchestrator::new(config).unwrap();
        assert!(orchestrator.run().await.is_err());
    }
}
