// file: src/search/insert.rs
// description: chunked bulk indexing of catalog products
// reference: https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-bulk.html

use crate::error::Result;
use crate::models::Product;
use crate::search::client::SearchClient;
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
struct BulkAction<'a> {
    index: BulkTarget<'a>,
}

#[derive(Debug, Serialize)]
struct BulkTarget<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
    #[serde(rename = "_id")]
    id: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertStats {
    pub documents_submitted: usize,
    pub documents_indexed: usize,
    pub errors: usize,
}

impl InsertStats {
    fn merge(&mut self, other: InsertStats) {
        self.documents_submitted += other.documents_submitted;
        self.documents_indexed += other.documents_indexed;
        self.errors += other.errors;
    }
}

pub struct BulkInserter<'a> {
    client: &'a SearchClient,
    chunk_size: usize,
}

impl<'a> BulkInserter<'a> {
    pub fn new(client: &'a SearchClient) -> Self {
        Self {
            client,
            chunk_size: client.config().bulk_chunk_size.max(1),
        }
    }

    /// Indexes products in chunks. Rejected documents are counted, a failed
    /// request aborts the load.
    pub async fn insert_products(&self, products: &[Product]) -> Result<InsertStats> {
        let index = self.client.index_name();
        let mut stats = InsertStats::default();

        for (chunk_no, chunk) in products.chunks(self.chunk_size).enumerate() {
            let body = Self::build_bulk_body(index, chunk)?;
            let response = self.client.bulk(body).await?;

            let mut chunk_stats = InsertStats {
                documents_submitted: chunk.len(),
                ..InsertStats::default()
            };

            for item in response.items.iter().flat_map(|entry| entry.values()) {
                if item.is_success() {
                    chunk_stats.documents_indexed += 1;
                } else {
                    chunk_stats.errors += 1;
                    warn!(
                        "Document {} rejected with status {}: {}",
                        item.id.as_deref().unwrap_or("?"),
                        item.status,
                        item.error
                            .as_ref()
                            .map(|e| e.to_string())
                            .unwrap_or_default()
                    );
                }
            }

            debug!(
                "Bulk chunk {}: {} submitted, {} indexed",
                chunk_no + 1,
                chunk_stats.documents_submitted,
                chunk_stats.documents_indexed
            );
            stats.merge(chunk_stats);
        }

        info!(
            "Bulk indexing finished: {} submitted, {} indexed, {} errors",
            stats.documents_submitted, stats.documents_indexed, stats.errors
        );

        Ok(stats)
    }

    /// NDJSON body: an `index` action line followed by the document source
    /// for every product, newline terminated.
    pub fn build_bulk_body(index: &str, products: &[Product]) -> Result<String> {
        let mut body = String::new();

        for product in products {
            let action = BulkAction {
                index: BulkTarget {
                    index,
                    id: &product.id,
                },
            };
            body.push_str(&serde_json::to_string(&action)?);
            body.push('\n');
            body.push_str(&serde_json::to_string(product)?);
            body.push('\n');
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: "овощи".to_string(),
            brand: String::new(),
            keywords: String::new(),
            weight: String::new(),
            package_size: String::new(),
            price: 10.0,
        }
    }

    #[test]
    fn test_bulk_body_layout() {
        let products = vec![product("1", "картофель"), product("2", "морковь")];
        let body = BulkInserter::build_bulk_body("products", &products).unwrap();

        assert!(body.ends_with('\n'));
        let lines: Vec<Value> = body
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], json!({"index": {"_index": "products", "_id": "1"}}));
        assert_eq!(lines[1]["name"], "картофель");
        assert!(lines[1].get("id").is_none());
        assert_eq!(lines[2], json!({"index": {"_index": "products", "_id": "2"}}));
        assert_eq!(lines[3]["name"], "морковь");
    }

    #[test]
    fn test_empty_body() {
        let body = BulkInserter::build_bulk_body("products", &[]).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_stats_merge() {
        let mut stats = InsertStats::default();
        stats.merge(InsertStats {
            documents_submitted: 3,
            documents_indexed: 2,
            errors: 1,
        });
        stats.merge(InsertStats {
            documents_submitted: 2,
            documents_indexed: 2,
            errors: 0,
        });

        assert_eq!(
            stats,
            InsertStats {
                documents_submitted: 5,
                documents_indexed: 4,
                errors: 1,
            }
        );
    }
}
