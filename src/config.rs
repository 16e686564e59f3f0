//! Graph configuration
//!
//! Every field has a default, so a YAML document only needs the keys it
//! changes:
//!
//! ```yaml
//! vertex_capacity: 100000
//! edge_capacity: 400000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Largest capacity a configuration may reserve up front
pub const MAX_CAPACITY: usize = 1 << 26;

/// Initial sizing for a [`PropertyGraph`](crate::graph::PropertyGraph)
///
/// Capacities are reservations, not limits: the graph grows past them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Vertex slots reserved up front
    pub vertex_capacity: usize,
    /// Edge slots reserved up front
    pub edge_capacity: usize,
    /// Label buckets reserved up front, per entity kind
    pub label_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            vertex_capacity: 1024,
            edge_capacity: 4096,
            label_capacity: 64,
        }
    }
}

impl GraphConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: GraphConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        info!("Loading graph configuration from {:?}", path);
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        check_capacity("vertex_capacity", self.vertex_capacity)?;
        check_capacity("edge_capacity", self.edge_capacity)?;
        check_capacity("label_capacity", self.label_capacity)
    }
}

fn check_capacity(name: &str, value: usize) -> ConfigResult<()> {
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{} must be greater than 0", name)));
    }
    if value > MAX_CAPACITY {
        return Err(ConfigError::Invalid(format!(
            "{} must be at most {}, got {}",
            name, MAX_CAPACITY, value
        )));
    }
    Ok(())
}
