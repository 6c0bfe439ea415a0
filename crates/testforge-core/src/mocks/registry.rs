//! Registry of stored mock endpoints.
//!
//! The registry stores normalized endpoints and resolves lookups by exact
//! (path, method). It is read-only from the dispatcher's point of view;
//! endpoints are loaded from the persistence layer before dispatch begins.

use crate::types::mock::{normalize_path, MockEndpoint};

/// Store for mock endpoints with exact (path, method) lookup.
#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    endpoints: Vec<MockEndpoint>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an endpoint, normalizing its path and method first.
    pub fn add(&mut self, endpoint: MockEndpoint) {
        self.endpoints.push(endpoint.normalized());
    }

    /// Add multiple endpoints.
    pub fn add_all(&mut self, endpoints: Vec<MockEndpoint>) {
        for endpoint in endpoints {
            self.add(endpoint);
        }
    }

    /// Find the ACTIVE endpoint registered under the exact (normalized path,
    /// upper-cased method) pair. Inactive endpoints never match.
    pub fn find(&self, path: &str, method: &str) -> Option<&MockEndpoint> {
        let path = normalize_path(path);
        let method = method.to_uppercase();
        self.endpoints
            .iter()
            .find(|ep| ep.is_active && ep.path == path && ep.method.as_str() == method)
    }

    /// Signatures of up to `limit` active endpoints, for 404 discovery.
    pub fn active_signatures(&self, limit: usize) -> Vec<String> {
        self.endpoints
            .iter()
            .filter(|ep| ep.is_active)
            .take(limit)
            .map(MockEndpoint::signature)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
