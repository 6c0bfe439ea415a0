//! Environments and their variables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single key/value entry of an [`Environment`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvironmentVariable {
    pub key: String,
    pub value: String,
    /// Secret values are masked in any user-facing listing
    #[serde(default)]
    pub is_secret: bool,
}

impl EnvironmentVariable {
    /// Value safe for display: secrets render as up to eight asterisks.
    pub fn masked_value(&self) -> String {
        if self.is_secret && !self.value.is_empty() {
            "*".repeat(self.value.len().min(8))
        } else {
            self.value.clone()
        }
    }
}

/// Named collection of variables usable across test executions.
///
/// Keys are unique within an environment; at most one environment per owner
/// is marked default. Both invariants are enforced by the persistence layer,
/// not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Environment {
    pub name: String,
    #[serde(default)]
    pub variables: Vec<EnvironmentVariable>,
    #[serde(default)]
    pub is_default: bool,
}

impl Environment {
    /// Flatten the variables into a map (a later duplicate key wins).
    pub fn variable_map(&self) -> BTreeMap<String, String> {
        self.variables
            .iter()
            .map(|var| (var.key.clone(), var.value.clone()))
            .collect()
    }
}
