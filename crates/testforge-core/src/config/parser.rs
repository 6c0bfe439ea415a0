//! Definition file parsing (YAML/JSON/JSONC).
//!
//! Test cases, mock endpoints, environments, and assertion rule lists are
//! authored as YAML or JSON documents; this module detects the format by
//! extension and deserializes into any `DeserializeOwned` target.

use crate::config::error::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Authoring file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Jsonc,
    Csv,
    Unknown,
}

/// Get the file type from a path extension
pub fn get_file_type(path: &str) -> ConfigFileType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        "jsonc" => ConfigFileType::Jsonc,
        "csv" => ConfigFileType::Csv,
        _ => ConfigFileType::Unknown,
    }
}

/// Strip comments from JSONC content
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let chars: Vec<char> = content.chars().collect();
    let len = chars.len();
    let mut i = 0;
    let mut in_string = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while i < len {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        // Handle string boundaries
        if c == '"' && !in_line_comment && !in_block_comment {
            let mut escape_count = 0;
            let mut j = result.len();
            while j > 0 && result.chars().nth(j - 1) == Some('\\') {
                escape_count += 1;
                j -= 1;
            }
            if escape_count % 2 == 0 {
                in_string = !in_string;
            }
        }

        if !in_string {
            // Start line comment
            if c == '/' && next == Some('/') && !in_block_comment {
                in_line_comment = true;
                i += 2;
                continue;
            }
            // Start block comment
            if c == '/' && next == Some('*') && !in_line_comment {
                in_block_comment = true;
                i += 2;
                continue;
            }
            // End line comment
            if in_line_comment && (c == '\n' || c == '\r') {
                in_line_comment = false;
                result.push(c);
                i += 1;
                continue;
            }
            // End block comment
            if in_block_comment && c == '*' && next == Some('/') {
                in_block_comment = false;
                i += 2;
                continue;
            }
        }

        if !in_line_comment && !in_block_comment {
            result.push(c);
        }
        i += 1;
    }

    result
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse JSONC content (JSON with comments)
pub fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let stripped = strip_json_comments(content);
    serde_json::from_str(&stripped).map_err(ConfigError::from)
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse definition content based on the path's file type
pub fn parse_definition<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Jsonc => parse_jsonc(content),
        ConfigFileType::Csv | ConfigFileType::Unknown => {
            Err(ConfigError::UnsupportedFileType(path.to_string()))
        }
    }
}
