// file: src/parser/queries.rs
// description: CSV reader for evaluation prefix queries
// reference: https://docs.rs/csv

use crate::error::{PipelineError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub const QUERY_COLUMN: &str = "query";

pub struct QueryReader;

impl QueryReader {
    pub fn read_file(path: &Path) -> Result<Vec<String>> {
        let file = File::open(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        let queries = Self::read_from(file, &path.display().to_string())?;
        info!("Read {} queries from {}", queries.len(), path.display());
        Ok(queries)
    }

    /// Reads the `query` column in file order. Other columns are ignored.
    pub fn read_from<R: Read>(reader: R, source_name: &str) -> Result<Vec<String>> {
        let query_error = |message: String| PipelineError::QueryFile {
            file: source_name.to_string(),
            message,
        };

        let mut reader = csv::Reader::from_reader(reader);

        let column = reader
            .headers()
            .map_err(|e| query_error(e.to_string()))?
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}') == QUERY_COLUMN)
            .ok_or_else(|| query_error(format!("missing '{}' column", QUERY_COLUMN)))?;

        let mut queries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| query_error(e.to_string()))?;
            queries.push(record.get(column).unwrap_or_default().to_string());
        }

        Ok(queries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reads_query_column() {
        let csv = "id,query,expected\n1,кар тофель,картофель\n2,\"молоко, 3.2%\",молоко\n3,ghbdtn,\n";
        let queries = QueryReader::read_from(csv.as_bytes(), "inline").unwrap();

        assert_eq!(queries, vec!["кар тофель", "молоко, 3.2%", "ghbdtn"]);
    }

    #[test]
    fn test_bom_prefixed_header() {
        let csv = "\u{feff}query\nсанпел\n";
        let queries = QueryReader::read_from(csv.as_bytes(), "inline").unwrap();

        assert_eq!(queries, vec!["санпел"]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "text\nкартофель\n";
        let result = QueryReader::read_from(csv.as_bytes(), "queries.csv");

        assert!(matches!(result, Err(PipelineError::QueryFile { .. })));
    }

    #[test]
    fn test_ragged_rows_are_an_error() {
        let csv = "query,id\nкартофель,1\nгреч не\n";
        let result = QueryReader::read_from(csv.as_bytes(), "queries.csv");

        assert!(result.is_err());
    }

    #[test]
    fn test_read_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("prefix_queries.csv");
        fs::write(&path, "query\nкар тофель\nprosc ros\n").unwrap();

        let queries = QueryReader::read_file(&path).unwrap();
        assert_eq!(queries.len(), 2);

        let missing = QueryReader::read_file(&temp.path().join("missing.csv"));
        assert!(matches!(missing, Err(PipelineError::FileOperation { .. })));
    }
}
