// file: src/parser/catalog.rs
// description: XML catalog parsing into normalized product records
// reference: https://docs.rs/roxmltree

use crate::error::{PipelineError, Result};
use crate::models::Product;
use crate::parser::normalizer::TextNormalizer;
use roxmltree::{Document, Node, ParsingOptions};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const PRODUCT_TAG: &str = "product";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub products_found: usize,
    pub products_loaded: usize,
    pub products_skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub products: Vec<Product>,
    pub report: LoadReport,
}

pub struct CatalogLoader {
    normalizer: TextNormalizer,
}

impl CatalogLoader {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn load_file(&self, path: &Path) -> Result<LoadedCatalog> {
        info!("Loading catalog from {}", path.display());

        let xml = fs::read_to_string(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse_str(&xml, &path.display().to_string())
    }

    /// Parses a catalog document. Products below the root element are found at
    /// any depth; products that fail extraction are skipped.
    pub fn parse_str(&self, xml: &str, source_name: &str) -> Result<LoadedCatalog> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };

        let document =
            Document::parse_with_options(xml, options).map_err(|e| PipelineError::CatalogParse {
                file: source_name.to_string(),
                message: e.to_string(),
            })?;

        let root = document.root_element();
        let mut catalog = LoadedCatalog::default();

        for node in root
            .descendants()
            .skip(1)
            .filter(|n| n.is_element() && n.has_tag_name(PRODUCT_TAG))
        {
            catalog.report.products_found += 1;

            match self.extract_product(node) {
                Ok(product) => {
                    debug!("Extracted product {}", product.id);
                    catalog.products.push(product);
                }
                Err(e) => {
                    catalog.report.products_skipped += 1;
                    warn!(
                        "Skipping product #{} in {}: {}",
                        catalog.report.products_found, source_name, e
                    );
                }
            }
        }

        catalog.report.products_loaded = catalog.products.len();

        info!(
            "Catalog {}: {} products found, {} loaded, {} skipped",
            source_name,
            catalog.report.products_found,
            catalog.report.products_loaded,
            catalog.report.products_skipped
        );

        Ok(catalog)
    }

    fn extract_product(&self, node: Node<'_, '_>) -> Result<Product> {
        let id = node
            .attribute("id")
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PipelineError::ProductExtraction("missing id attribute".to_string()))?;

        let field = |name: &str| self.normalizer.normalize(child_text(node, name));

        Ok(Product {
            id: id.to_string(),
            name: field("name"),
            description: field("description"),
            category: field("category"),
            brand: field("brand"),
            keywords: field("keywords"),
            weight: field("weight"),
            package_size: field("package_size"),
            price: parse_price(id, child_text(node, "price")),
        })
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(TextNormalizer::new())
    }
}

/// Text of the first direct child element named `tag`. A present but empty
/// element yields `Some("")`.
fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|child| child.is_element() && child.has_tag_name(tag))
        .map(|child| child.text().unwrap_or(""))
}

fn parse_price(id: &str, raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return 0.0;
    };

    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() => price,
        _ => {
            debug!("Product {} has unparseable price {:?}, using 0.0", id, raw);
            0.0
        }
    }
}
