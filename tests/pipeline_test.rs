use catalog_suggest::{Config, PipelineOrchestrator};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog>
  <products>
    <product id="1">
      <name>Картофель молодой</name>
      <category>Овощи</category>
      <price>59.90</price>
    </product>
    <product id="2">
      <name>Гречневая крупа</name>
      <category>Крупы</category>
    </product>
    <product>
      <name>Без идентификатора</name>
    </product>
  </products>
</catalog>
"#;

const QUERIES: &str = "query\nкар тофель\nнеизвестное\nсломано\nкар тофель\n";

fn test_config(uri: &str, dir: &Path) -> Config {
    let catalog_path = dir.join("catalog_products.xml");
    let queries_path = dir.join("prefix_queries.csv");
    fs::write(&catalog_path, CATALOG).unwrap();
    fs::write(&queries_path, QUERIES).unwrap();

    let mut config = Config::default_config();
    config.search.url = uri.to_string();
    config.search.max_retries = 2;
    config.search.retry_delay_secs = 0;
    config.search.request_timeout_secs = 5;
    config.catalog.path = catalog_path;
    config.evaluation.queries_path = queries_path;
    config.evaluation.results_path = dir.join("out/results.json");
    config.evaluation.stats_path = dir.join("out/stats.json");
    config
}

async fn mount_engine(server: &MockServer) {
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/products"))
        .and(body_string_contains("edge_ngram_analyzer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "took": 7,
            "errors": false,
            "items": [
                {"index": {"_id": "1", "status": 201}},
                {"index": {"_id": "2", "status": 201}}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/products/_refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products/_count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 2})))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/products/_search"))
        .and(body_string_contains("картофель"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": {
                "hits": [
                    {"_id": "1", "_score": 9.1, "_source": {"name": "картофель молодой", "category": "овощи"}},
                    {"_id": "2", "_score": 0.4, "_source": {"name": "гречневая крупа", "category": "крупы"}}
                ]
            }
        })))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/products/_search"))
        .and(body_string_contains("сломано"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/products/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": {"hits": []}})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_run_writes_results_and_stats() {
    let server = MockServer::start().await;
    mount_engine(&server).await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server.uri(), dir.path());
    let orchestrator = PipelineOrchestrator::new(config)
        .unwrap()
        .with_progress(false, false);

    let stats = orchestrator.run().await.unwrap();

    assert_eq!(stats.products_found, 3);
    assert_eq!(stats.products_loaded, 2);
    assert_eq!(stats.products_skipped, 1);
    assert_eq!(stats.documents_indexed, 2);
    assert_eq!(stats.queries_total, 4);
    assert_eq!(stats.queries_successful, 2);
    assert_eq!(stats.coverage_percentage, 50.0);

    let written_stats: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out/stats.json")).unwrap())
            .unwrap();
    assert_eq!(
        written_stats,
        json!({
            "total_queries": 4,
            "successful_searches": 2,
            "coverage_percentage": 50.0
        })
    );

    let results_text = fs::read_to_string(dir.path().join("out/results.json")).unwrap();
    let results: Value = serde_json::from_str(&results_text).unwrap();
    let keys: Vec<&String> = results.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 3);
    assert_eq!(
        results["кар тофель"],
        json!([
            {"id": "1", "name": "картофель молодой", "category": "овощи", "score": 9.1},
            {"id": "2", "name": "гречневая крупа", "category": "крупы", "score": 0.4}
        ])
    );
    assert_eq!(results["неизвестное"], json!([]));
    assert_eq!(results["сломано"], json!([]));
    assert!(results_text.find("кар тофель").unwrap() < results_text.find("неизвестное").unwrap());
}

#[tokio::test]
async fn test_bulk_body_skips_products_without_id() {
    let server = MockServer::start().await;
    mount_engine(&server).await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server.uri(), dir.path());
    let orchestrator = PipelineOrchestrator::new(config)
        .unwrap()
        .with_progress(false, false);

    let (load_report, insert_stats) = orchestrator.index_catalog().await.unwrap();
    assert_eq!(load_report.products_loaded, 2);
    assert_eq!(insert_stats.documents_submitted, 2);

    let requests = server.received_requests().await.unwrap();
    let bulk = requests
        .iter()
        .find(|r| r.url.path() == "/_bulk")
        .expect("bulk request was sent");

    let body = String::from_utf8(bulk.body.clone()).unwrap();
    let lines: Vec<Value> = body
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], json!({"index": {"_index": "products", "_id": "1"}}));
    assert_eq!(lines[1]["name"], "картофель молодой");
    assert_eq!(lines[1]["price"], 59.9);
    assert_eq!(lines[3]["price"], 0.0);
}
