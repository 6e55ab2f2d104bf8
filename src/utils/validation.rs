// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::fs;
use std::path::Path;

const INDEX_NAME_FORBIDDEN: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':'];

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            PipelineError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(PipelineError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// Index names must be lowercase, must not start with `-`, `_` or `+`,
    /// and must not contain path or wildcard characters.
    pub fn validate_index_name(name: &str) -> Result<()> {
        if name.is_empty() || name == "." || name == ".." {
            return Err(PipelineError::Validation(format!(
                "Invalid index name: {:?}",
                name
            )));
        }

        if name.starts_with(['-', '_', '+']) {
            return Err(PipelineError::Validation(format!(
                "Index name cannot start with '-', '_' or '+': {}",
                name
            )));
        }

        if name.chars().any(|c| c.is_uppercase()) {
            return Err(PipelineError::Validation(format!(
                "Index name must be lowercase: {}",
                name
            )));
        }

        if let Some(c) = name.chars().find(|c| INDEX_NAME_FORBIDDEN.contains(c)) {
            return Err(PipelineError::Validation(format!(
                "Index name contains forbidden character {:?}: {}",
                c, name
            )));
        }

        Ok(())
    }

    pub fn validate_batch_size(size: usize) -> Result<()> {
        if size == 0 {
            return Err(PipelineError::Validation(
                "Batch size must be greater than 0".to_string(),
            ));
        }

        if size > 10000 {
            return Err(PipelineError::Validation(
                "Batch size too large (max 10000)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let truncated: String = text.chars().take(max_chars).collect();
            format!("{}...", truncated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_path() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("catalog.xml");
        fs::write(&file_path, "<catalog/>").unwrap();

        assert!(Validator::validate_file_path(&file_path).is_ok());
        assert!(Validator::validate_file_path(temp.path()).is_err());
        assert!(Validator::validate_file_path(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://es:9200").is_ok());
        assert!(Validator::validate_url("es:9200").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_index_name() {
        assert!(Validator::validate_index_name("products").is_ok());
        assert!(Validator::validate_index_name("products-2024").is_ok());
        assert!(Validator::validate_index_name("").is_err());
        assert!(Validator::validate_index_name("Products").is_err());
        assert!(Validator::validate_index_name("_products").is_err());
        assert!(Validator::validate_index_name("pro ducts").is_err());
        assert!(Validator::validate_index_name("a/b").is_err());
    }

    #[test]
    fn test_validate_batch_size() {
        assert!(Validator::validate_batch_size(500).is_ok());
        assert!(Validator::validate_batch_size(0).is_err());
        assert!(Validator::validate_batch_size(10001).is_err());
    }

    #[test]
    fn test_truncate_text_is_char_aware() {
        assert_eq!(Validator::truncate_text("молоко", 10), "молоко");
        assert_eq!(Validator::truncate_text("картофель", 4), "карт...");
    }
}
