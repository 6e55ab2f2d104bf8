// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Search engine error: {0}")]
    SearchEngine(String),

    #[error("Search engine returned {status} for {operation}: {body}")]
    SearchEngineStatus {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Catalog parsing error in {file}: {message}")]
    CatalogParse { file: String, message: String },

    #[error("Product extraction error: {0}")]
    ProductExtraction(String),

    #[error("Query file error in {file}: {message}")]
    QueryFile { file: String, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}
