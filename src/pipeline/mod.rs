// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod evaluator;
mod orchestrator;
mod progress;

pub use evaluator::{EvaluationReport, QueryEvaluator};
pub use orchestrator::PipelineOrchestrator;
pub use progress::{ProgressTracker, RunStats};
