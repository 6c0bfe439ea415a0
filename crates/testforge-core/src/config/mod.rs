//! External authoring formats: definition files and datasets.

pub mod dataset;
pub mod error;
pub mod parser;

pub use dataset::{parse_csv, parse_dataset, parse_json as parse_json_dataset};
pub use error::{ConfigError, DatasetError};
pub use parser::{get_file_type, parse_definition, ConfigFileType};
