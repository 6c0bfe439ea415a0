//! Error types for definition and dataset parsing.

use thiserror::Error;

/// Definition file parsing error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// File extension not recognized as a definition format
    #[error("unsupported definition file type: {0}")]
    UnsupportedFileType(String),
}

/// Dataset file parsing error
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Dataset JSON is syntactically invalid
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// Dataset JSON is not an array
    #[error("JSON dataset must be an array of objects")]
    NotAnArray,
    /// An array element is not an object
    #[error("JSON dataset row {0} is not an object")]
    RowNotAnObject(usize),
    /// CSV content ended inside a quoted field
    #[error("CSV dataset has an unterminated quoted field")]
    UnclosedQuote,
    /// File extension not recognized as a dataset format
    #[error("unsupported dataset file type: {0}")]
    UnsupportedFileType(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error;

    #[rstest]
    fn test_config_error_json_display_and_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = ConfigError::from(json_err);
        assert!(error.to_string().contains("JSON parsing error"));
        assert!(error.source().is_some());
    }

    #[rstest]
    fn test_config_error_yaml_display_and_source() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("invalid: yaml: [").unwrap_err();
        let error = ConfigError::from(yaml_err);
        assert!(error.to_string().contains("YAML parsing error"));
        assert!(error.source().is_some());
    }

    #[rstest]
    #[case("test.txt")]
    #[case("unknown.extension")]
    #[case("")]
    fn test_config_error_unsupported_file_type_display(#[case] path: &str) {
        let error = ConfigError::UnsupportedFileType(path.to_string());
        assert!(error.to_string().contains("unsupported definition file type"));
        assert!(error.to_string().contains(path));
        assert!(error.source().is_none());
    }

    #[rstest]
    fn test_dataset_error_display() {
        assert!(DatasetError::NotAnArray.to_string().contains("array of objects"));
        assert!(DatasetError::RowNotAnObject(3).to_string().contains("row 3"));
        assert!(DatasetError::UnclosedQuote.to_string().contains("unterminated"));
    }
}
