//! Outbound HTTP: executor and response snapshot.

pub mod executor;
pub mod response;

pub use executor::{ExecutorError, HttpExecutor, EXECUTION_TIMEOUT_MS};
pub use response::HttpResponse;
