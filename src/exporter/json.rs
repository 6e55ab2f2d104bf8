// file: src/exporter/json.rs
// description: json export of evaluation results and coverage statistics

use crate::error::{PipelineError, Result};
use crate::models::{CoverageStats, SearchHit};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    results_path: PathBuf,
    stats_path: PathBuf,
}

impl JsonExporter {
    pub fn new(results_path: impl Into<PathBuf>, stats_path: impl Into<PathBuf>) -> Self {
        Self {
            results_path: results_path.into(),
            stats_path: stats_path.into(),
        }
    }

    pub fn export_results(&self, results: &IndexMap<String, Vec<SearchHit>>) -> Result<()> {
        write_pretty(&self.results_path, results)?;
        info!(
            "Wrote results for {} queries to {}",
            results.len(),
            self.results_path.display()
        );
        Ok(())
    }

    pub fn export_stats(&self, stats: &CoverageStats) -> Result<()> {
        write_pretty(&self.stats_path, stats)?;
        info!("Wrote statistics to {}", self.stats_path.display());
        Ok(())
    }
}

/// Two-space indented UTF-8 JSON; parent directories are created on demand.
fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file_error = |source: std::io::Error| PipelineError::FileOperation {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(file_error)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(file_error)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(file_error)?;
    Ok(())
}
