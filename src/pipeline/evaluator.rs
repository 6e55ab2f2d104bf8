// file: src/pipeline/evaluator.rs
// description: prefix query evaluation against the search index
// reference: typo correction, normalization and boosted search per query

use crate::error::Result;
use crate::models::{CoverageStats, SearchHit};
use crate::parser::{TextNormalizer, TypoCorrector};
use crate::pipeline::progress::ProgressTracker;
use crate::search::{SearchClient, build_prefix_query};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Per-query hits keyed by the raw query text, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct EvaluationReport {
    pub results: IndexMap<String, Vec<SearchHit>>,
    pub stats: CoverageStats,
}

pub struct QueryEvaluator<'a> {
    client: &'a SearchClient,
    corrector: TypoCorrector,
    normalizer: TextNormalizer,
    result_size: usize,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(client: &'a SearchClient, result_size: usize) -> Self {
        Self {
            client,
            corrector: TypoCorrector::new(),
            normalizer: TextNormalizer::new(),
            result_size,
        }
    }

    /// Typo correction followed by normalization.
    pub fn prepare_query(&self, raw: &str) -> String {
        self.normalizer.normalize_str(self.corrector.correct(raw))
    }

    pub async fn try_search_prefix(&self, raw: &str) -> Result<Vec<SearchHit>> {
        let prepared = self.prepare_query(raw);
        debug!("Query {:?} prepared as {:?}", raw, prepared);

        let body = build_prefix_query(&prepared, self.result_size);
        let mut hits = self.client.search(self.client.index_name(), &body).await?;
        hits.truncate(self.result_size);
        Ok(hits)
    }

    /// A failed search counts as a miss.
    pub async fn search_prefix(&self, raw: &str) -> Vec<SearchHit> {
        match self.try_search_prefix(raw).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Search failed for {:?}: {}", raw, e);
                Vec::new()
            }
        }
    }

    /// Runs every query in order. Repeated queries are searched and counted
    /// each time; the last result list is kept.
    pub async fn evaluate(
        &self,
        queries: &[String],
        progress: &ProgressTracker,
    ) -> EvaluationReport {
        let mut results = IndexMap::with_capacity(queries.len());
        let mut successful = 0;

        for query in queries {
            let hits = self.search_prefix(query).await;
            progress.record(query, hits.len());

            if !hits.is_empty() {
                successful += 1;
            }
            results.insert(query.clone(), hits);
        }

        progress.finish();

        EvaluationReport {
            results,
            stats: CoverageStats::new(queries.len(), successful),
        }
    }
}
