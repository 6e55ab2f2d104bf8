// file: src/search/query.rs
// description: boosted multi-field prefix query construction
// reference: https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-bool-query.html

use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeight {
    pub field: &'static str,
    /// `None` keeps the engine default of 1.0 and emits the short `match` form.
    pub boost: Option<f64>,
    pub fuzzy: bool,
}

pub const PREFIX_FIELDS: [FieldWeight; 5] = [
    FieldWeight {
        field: "name",
        boost: Some(3.0),
        fuzzy: true,
    },
    FieldWeight {
        field: "category",
        boost: Some(2.0),
        fuzzy: true,
    },
    FieldWeight {
        field: "brand",
        boost: Some(1.5),
        fuzzy: false,
    },
    FieldWeight {
        field: "keywords",
        boost: Some(1.2),
        fuzzy: false,
    },
    FieldWeight {
        field: "description",
        boost: None,
        fuzzy: false,
    },
];

pub const DEFAULT_RESULT_SIZE: usize = 10;

impl FieldWeight {
    pub fn effective_boost(&self) -> f64 {
        self.boost.unwrap_or(1.0)
    }

    fn match_clause(&self, text: &str) -> Value {
        if self.boost.is_none() && !self.fuzzy {
            return json!({ "match": { self.field: text } });
        }

        let mut params = Map::new();
        params.insert("query".to_string(), json!(text));
        if let Some(boost) = self.boost {
            params.insert("boost".to_string(), json!(boost));
        }
        if self.fuzzy {
            params.insert("fuzziness".to_string(), json!("AUTO"));
        }

        json!({ "match": { self.field: params } })
    }
}

/// `bool.should` over [`PREFIX_FIELDS`] for an already normalized query.
pub fn build_prefix_query(normalized: &str, size: usize) -> Value {
    let should: Vec<Value> = PREFIX_FIELDS
        .iter()
        .map(|field| field.match_clause(normalized))
        .collect();

    json!({
        "query": {
            "bool": {
                "should": should
            }
        },
        "size": size
    })
}
