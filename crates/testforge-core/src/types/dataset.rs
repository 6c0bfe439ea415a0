//! Tabular datasets for data-driven runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed test dataset: a header row plus data rows.
///
/// Row order is execution order; rows are padded/truncated to the header
/// width at parse time, so `row_variables` can assume equal lengths.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestDataset {
    /// Column names, in file order
    pub headers: Vec<String>,
    /// Data rows, in file order
    pub rows: Vec<Vec<String>>,
}

impl TestDataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Zip the header row onto data row `index`.
    ///
    /// Positional 1:1 mapping; a duplicate header keeps the later column's
    /// value. Cells beyond the header width are ignored, missing cells are
    /// skipped (parse-time padding normally prevents both).
    pub fn row_variables(&self, index: usize) -> BTreeMap<String, String> {
        let mut variables = BTreeMap::new();
        if let Some(row) = self.rows.get(index) {
            for (i, header) in self.headers.iter().enumerate() {
                if let Some(cell) = row.get(i) {
                    variables.insert(header.clone(), cell.clone());
                }
            }
        }
        variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dataset() -> TestDataset {
        TestDataset::new(
            vec!["username".to_string(), "password".to_string()],
            vec![
                vec!["u1".to_string(), "p1".to_string()],
                vec!["u2".to_string(), "p2".to_string()],
            ],
        )
    }

    #[rstest]
    fn test_row_variables_zips_headers() {
        let vars = dataset().row_variables(1);
        assert_eq!(vars.get("username").map(String::as_str), Some("u2"));
        assert_eq!(vars.get("password").map(String::as_str), Some("p2"));
    }

    #[rstest]
    fn test_row_variables_out_of_range_is_empty() {
        assert!(dataset().row_variables(5).is_empty());
    }

    #[rstest]
    fn test_row_variables_duplicate_header_later_wins() {
        let dataset = TestDataset::new(
            vec!["key".to_string(), "key".to_string()],
            vec![vec!["first".to_string(), "second".to_string()]],
        );

        let vars = dataset.row_variables(0);
        assert_eq!(vars.get("key").map(String::as_str), Some("second"));
    }

    #[rstest]
    fn test_len_and_is_empty() {
        assert_eq!(dataset().len(), 2);
        assert!(!dataset().is_empty());
        assert!(TestDataset::default().is_empty());
    }
}
