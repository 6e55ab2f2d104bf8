// file: src/search/client.rs
// description: Elasticsearch REST client wrapper with connection management
// reference: https://www.elastic.co/guide/en/elasticsearch/reference/current/rest-apis.html

use crate::config::SearchConfig;
use crate::error::{PipelineError, Result};
use crate::models::SearchHit;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score")]
    score: Option<f64>,
    #[serde(rename = "_source", default)]
    source: HitSource,
}

/// Documents written by other tools may carry non-string values here, so the
/// fields are read loosely and rendered as text.
#[derive(Debug, Default, Deserialize)]
struct HitSource {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
}

impl RawHit {
    fn into_hit(self) -> SearchHit {
        SearchHit::new(
            self.id,
            source_text(self.source.name),
            source_text(self.source.category),
            self.score.unwrap_or(0.0),
        )
    }
}

fn source_text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

/// Response of the `_bulk` endpoint. Each item is keyed by its action name.
#[derive(Debug, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<HashMap<String, BulkItem>>,
}

#[derive(Debug, Deserialize)]
pub struct BulkItem {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub status: u16,
    pub error: Option<Value>,
}

impl BulkItem {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone)]
pub struct SearchClient {
    http: Client,
    base_url: String,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PipelineError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = config.url.trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    pub fn index_name(&self) -> &str {
        &self.config.index_name
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub async fn ping(&self) -> Result<bool> {
        debug!("Pinging search engine at {}", self.base_url);

        let response = self
            .request(Method::HEAD, "")
            .send()
            .await
            .map_err(|e| PipelineError::Connection(format!("Ping failed: {}", e)))?;

        Ok(response.status().is_success())
    }

    /// Pings with the configured attempt count and delay.
    pub async fn wait_until_ready(&self) -> Result<()> {
        self.wait_with_retry(self.config.max_retries, self.config.retry_delay())
            .await
    }

    /// Bounded retry loop: at most `max_attempts` pings, sleeping `delay`
    /// between failed attempts.
    pub async fn wait_with_retry(&self, max_attempts: u32, delay: Duration) -> Result<()> {
        info!("Waiting for search engine at {}", self.base_url);

        for attempt in 1..=max_attempts {
            match self.ping().await {
                Ok(true) => {
                    info!("Connected to search engine (attempt {})", attempt);
                    return Ok(());
                }
                Ok(false) => {
                    debug!("Attempt {}/{}: engine not ready", attempt, max_attempts);
                }
                Err(e) => {
                    debug!("Attempt {}/{}: {}", attempt, max_attempts, e);
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(delay).await;
            }
        }

        Err(PipelineError::Connection(format!(
            "Cannot connect to search engine at {} after {} attempts",
            self.base_url, max_attempts
        )))
    }

    pub async fn index_exists(&self, index: &str) -> Result<bool> {
        let response = self
            .request(Method::HEAD, index)
            .send()
            .await
            .map_err(|e| transport_error("index exists", e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(status_error("index exists", response).await),
        }
    }

    pub async fn delete_index(&self, index: &str) -> Result<()> {
        info!("Deleting index {}", index);

        let response = self
            .request(Method::DELETE, index)
            .send()
            .await
            .map_err(|e| transport_error("delete index", e))?;

        ensure_success("delete index", response).await?;
        Ok(())
    }

    pub async fn create_index(&self, index: &str, definition: &Value) -> Result<()> {
        info!("Creating index {}", index);

        let response = self
            .request(Method::PUT, index)
            .json(definition)
            .send()
            .await
            .map_err(|e| transport_error("create index", e))?;

        ensure_success("create index", response).await?;
        Ok(())
    }

    /// Sends a pre-built NDJSON bulk body.
    pub async fn bulk(&self, body: String) -> Result<BulkResponse> {
        let response = self
            .request(Method::POST, "_bulk")
            .header("Content-Type", "application/x-ndjson")
            .body(body)
            .send()
            .await
            .map_err(|e| transport_error("bulk", e))?;

        let response = ensure_success("bulk", response).await?;

        response
            .json::<BulkResponse>()
            .await
            .map_err(|e| PipelineError::SearchEngine(format!("Failed to parse bulk response: {}", e)))
    }

    pub async fn refresh(&self, index: &str) -> Result<()> {
        debug!("Refreshing index {}", index);

        let response = self
            .request(Method::POST, &format!("{}/_refresh", index))
            .send()
            .await
            .map_err(|e| transport_error("refresh", e))?;

        ensure_success("refresh", response).await?;
        Ok(())
    }

    pub async fn count(&self, index: &str) -> Result<u64> {
        let response = self
            .request(Method::GET, &format!("{}/_count", index))
            .send()
            .await
            .map_err(|e| transport_error("count", e))?;

        let response = ensure_success("count", response).await?;

        let count: CountResponse = response.json().await.map_err(|e| {
            PipelineError::SearchEngine(format!("Failed to parse count response: {}", e))
        })?;

        Ok(count.count)
    }

    /// Runs a search request and returns hits in the engine's ranking order.
    pub async fn search(&self, index: &str, body: &Value) -> Result<Vec<SearchHit>> {
        let response = self
            .request(Method::POST, &format!("{}/_search", index))
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error("search", e))?;

        let response = ensure_success("search", response).await?;

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            PipelineError::SearchEngine(format!("Failed to parse search response: {}", e))
        })?;

        let hits: Vec<SearchHit> = parsed
            .hits
            .hits
            .into_iter()
            .map(RawHit::into_hit)
            .collect();

        debug!("Search returned {} hits", hits.len());
        Ok(hits)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = if path.is_empty() {
            format!("{}/", self.base_url)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        self.http.request(method, url)
    }
}

fn transport_error(operation: &str, err: reqwest::Error) -> PipelineError {
    PipelineError::SearchEngine(format!("{} request failed: {}", operation, err))
}

async fn status_error(operation: &str, response: Response) -> PipelineError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    warn!("{} failed with status {}", operation, status);

    PipelineError::SearchEngineStatus {
        operation: operation.to_string(),
        status,
        body,
    }
}

async fn ensure_success(operation: &str, response: Response) -> Result<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(status_error(operation, response).await)
    }
}
