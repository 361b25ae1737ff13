//! Local CSV row source
//!
//! Reads an exported copy of the player sheet. Rows may have any length;
//! the normalizer treats missing cells as empty.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use shared::{component_debug, Component};

use crate::core::RawRow;
use crate::error::{ScoreboardError, ScoreboardResult};
use crate::traits::RowSource;

pub struct CsvRowSource {
    path: PathBuf,
    header_rows: usize,
}

impl CsvRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            header_rows: 1,
        }
    }

    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }
}

/// Parse CSV text into rows, dropping the first `header_rows`
pub fn parse_csv_rows(content: &str, header_rows: usize) -> ScoreboardResult<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records().skip(header_rows) {
        let record = record?;
        rows.push(RawRow::new(record.iter()));
    }
    Ok(rows)
}

#[async_trait]
impl RowSource for CsvRowSource {
    async fn fetch_rows(&self) -> ScoreboardResult<Vec<RawRow>> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            ScoreboardError::source_unavailable(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let rows = parse_csv_rows(&content, self.header_rows).map_err(|e| {
            let message = format!("malformed csv {}: {e}", self.path.display());
            ScoreboardError::source_unavailable(message)
        })?;
        component_debug!(
            Component::Source,
            "📥 Read {} rows from {}",
            rows.len(),
            self.path.display()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_header_and_allows_ragged_rows() {
        let content = "ts,player,essence\n1,Ann,10,,,a:1|b:0\n2,Bo\n";
        let rows = parse_csv_rows(content, 1).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cell(1), "Ann");
        assert_eq!(rows[0].cell(5), "a:1|b:0");
        assert_eq!(rows[1].cell(2), "");
    }

    #[tokio::test]
    async fn test_fetch_rows_honours_header_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        fs::write(&path, "Season 4\nts,player,essence\n1,Ann,10\n").await.unwrap();

        let rows = CsvRowSource::new(&path).with_header_rows(2).fetch_rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cell(1), "Ann");

        let rows = CsvRowSource::new(&path).fetch_rows().await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = CsvRowSource::new(dir.path().join("absent.csv")).fetch_rows().await;
        assert!(matches!(result, Err(ScoreboardError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_quoted_cells_keep_commas() {
        let rows = parse_csv_rows("x,\"Smith, J\",5\n", 0).unwrap();
        assert_eq!(rows[0].cell(1), "Smith, J");
    }
}
