// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "CATALOG_SUGGEST";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub catalog: CatalogConfig,
    pub evaluation: EvaluationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub url: String,
    pub index_name: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_delay_secs: u64,
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
    pub bulk_chunk_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvaluationConfig {
    pub queries_path: PathBuf,
    pub results_path: PathBuf,
    pub stats_path: PathBuf,
    pub result_size: usize,
}

impl SearchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl Config {
    /// Layers built-in defaults, the config file and `CATALOG_SUGGEST__*`
    /// environment variables. An explicit path must exist; the default file
    /// is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let file = match path {
            Some(path) => config::File::from(path),
            None => config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false),
        };

        Self::build(file, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    fn build<S>(file: S, environment: config::Environment) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(environment)
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            search: SearchConfig {
                url: "http://es:9200".to_string(),
                index_name: "products".to_string(),
                request_timeout_secs: 30,
                max_retries: 30,
                retry_delay_secs: 5,
                number_of_shards: 1,
                number_of_replicas: 0,
                bulk_chunk_size: 500,
            },
            catalog: CatalogConfig {
                path: PathBuf::from("data/catalog_products.xml"),
            },
            evaluation: EvaluationConfig {
                queries_path: PathBuf::from("data/prefix_queries.csv"),
                results_path: PathBuf::from("data/results.json"),
                stats_path: PathBuf::from("data/stats.json"),
                result_size: 10,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.search.url)
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        Validator::validate_index_name(&self.search.index_name)
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        Validator::validate_batch_size(self.search.bulk_chunk_size)
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if self.search.max_retries == 0 {
            return Err(PipelineError::Config(
                "max_retries must be greater than 0".to_string(),
            ));
        }

        if self.evaluation.result_size == 0 {
            return Err(PipelineError::Config(
                "result_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
