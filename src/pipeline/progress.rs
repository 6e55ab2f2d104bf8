// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for pipeline execution
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub products_found: usize,
    pub products_loaded: usize,
    pub products_skipped: usize,
    pub documents_indexed: usize,
    pub bulk_errors: usize,
    pub queries_total: usize,
    pub queries_successful: usize,
    pub coverage_percentage: f64,
    pub duration_secs: f64,
}

impl RunStats {
    pub fn queries_failed(&self) -> usize {
        self.queries_total.saturating_sub(self.queries_successful)
    }

    pub fn load_rate(&self) -> f64 {
        if self.products_found == 0 {
            return 0.0;
        }
        (self.products_loaded as f64 / self.products_found as f64) * 100.0
    }

    pub fn queries_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.queries_total as f64 / self.duration_secs
    }
}

/// Progress bar over the evaluation queries with hit/miss counters.
pub struct ProgressTracker {
    bar: ProgressBar,
    successful: AtomicUsize,
    failed: AtomicUsize,
}

impl ProgressTracker {
    pub fn with_color(total_queries: usize, colored: bool) -> Self {
        Self::from_bar(create_progress_bar(total_queries as u64, colored))
    }

    pub fn hidden() -> Self {
        Self::from_bar(ProgressBar::hidden())
    }

    fn from_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            successful: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    pub fn record(&self, query: &str, hit_count: usize) {
        if hit_count > 0 {
            self.successful.fetch_add(1, Ordering::SeqCst);
        } else {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
        self.bar.inc(1);
        self.bar.set_message(format!(
            "hits: {} | misses: {} | {}",
            self.successful(),
            self.failed(),
            query
        ));
    }

    pub fn successful(&self) -> usize {
        self.successful.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_with_message(format!(
                "hits: {} | misses: {}",
                self.successful(),
                self.failed()
            ));
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}"
    };
    let chars = if colored { "█▓▒░" } else { "=>-" };

    match ProgressStyle::default_bar().template(template) {
        Ok(style) => bar.set_style(style.progress_chars(chars)),
        Err(_) => bar.set_style(ProgressStyle::default_bar()),
    }
    bar
}
