// file: src/search/schema.rs
// description: index settings and field mappings for autocomplete search
// reference: https://www.elastic.co/guide/en/elasticsearch/reference/current/analysis-edgengram-tokenfilter.html

use crate::error::Result;
use crate::search::client::SearchClient;
use serde_json::{Value, json};
use tracing::info;

pub const EDGE_NGRAM_ANALYZER: &str = "edge_ngram_analyzer";
pub const EDGE_NGRAM_MIN_GRAM: u32 = 2;
pub const EDGE_NGRAM_MAX_GRAM: u32 = 10;

/// Plain `text` fields indexed with the default analyzer.
pub const TEXT_FIELDS: [&str; 6] = [
    "description",
    "category",
    "brand",
    "keywords",
    "weight",
    "package_size",
];

pub struct SchemaManager<'a> {
    client: &'a SearchClient,
}

impl<'a> SchemaManager<'a> {
    pub fn new(client: &'a SearchClient) -> Self {
        Self { client }
    }

    /// Drops the index when present and creates it from scratch.
    pub async fn recreate(&self) -> Result<()> {
        let index = self.client.index_name();

        if self.client.index_exists(index).await? {
            info!("Index '{}' exists, dropping it", index);
            self.client.delete_index(index).await?;
        }

        let config = self.client.config();
        let definition = Self::index_definition(config.number_of_shards, config.number_of_replicas);
        self.client.create_index(index, &definition).await?;

        info!("Index '{}' created", index);
        Ok(())
    }

    pub async fn verify(&self) -> Result<bool> {
        self.client.index_exists(self.client.index_name()).await
    }

    /// `name` is indexed as edge n-grams for prefix matching and searched with
    /// the standard analyzer so queries are not split into grams.
    pub fn index_definition(number_of_shards: u32, number_of_replicas: u32) -> Value {
        let mut properties = serde_json::Map::new();

        properties.insert(
            "name".to_string(),
            json!({
                "type": "text",
                "analyzer": EDGE_NGRAM_ANALYZER,
                "search_analyzer": "standard"
            }),
        );

        for field in TEXT_FIELDS {
            properties.insert(field.to_string(), json!({ "type": "text" }));
        }

        properties.insert("price".to_string(), json!({ "type": "float" }));

        json!({
            "settings": {
                "number_of_shards": number_of_shards,
                "number_of_replicas": number_of_replicas,
                "analysis": {
                    "analyzer": {
                        EDGE_NGRAM_ANALYZER: {
                            "type": "custom",
                            "tokenizer": "standard",
                            "filter": ["lowercase", "edge_ngram"]
                        }
                    },
                    "filter": {
                        "edge_ngram": {
                            "type": "edge_ngram",
                            "min_gram": EDGE_NGRAM_MIN_GRAM,
                            "max_gram": EDGE_NGRAM_MAX_GRAM
                        }
                    }
                }
            },
            "mappings": {
                "properties": properties
            }
        })
    }
}
