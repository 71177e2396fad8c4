//! Configuration for the longest-path engine.

use serde::{Deserialize, Serialize};

use super::longest_path::DEFAULT_WEIGHT_ATTRIBUTE;
use super::topo::SortAlgorithm;
use crate::Result;

/// Settings applied by [`LongestPath`](super::LongestPath) on `compute()`.
///
/// Missing fields fall back to their defaults when deserialized, so
/// `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongestPathConfig {
    /// Relationship property holding the edge weight.
    pub weight_attribute: String,
    /// Topological ordering used for the relaxation pass.
    pub sort: SortAlgorithm,
}

impl Default for LongestPathConfig {
    fn default() -> Self {
        Self {
            weight_attribute: DEFAULT_WEIGHT_ATTRIBUTE.to_string(),
            sort: SortAlgorithm::default(),
        }
    }
}

impl LongestPathConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_weight_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.weight_attribute = attribute.into();
        self
    }

    pub fn with_sort(mut self, sort: SortAlgorithm) -> Self {
        self.sort = sort;
        self
    }
}
