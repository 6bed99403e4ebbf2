//! Configuration-based wiring
//!
//! Components are always registered in code (their factories cannot come
//! from a file), but which component serves a capability, and the container's
//! cache mode, can be loaded from TOML or JSON.

use serde::{Deserialize, Serialize};

use crate::builder::ContainerBuilder;
use crate::container::CacheMode;
use crate::error::{ContainerError, DiResult};

/// One capability-to-component binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Capability name
    pub capability: String,
    /// Component name the capability resolves to
    pub component: String,
}

/// Container configuration
///
/// ```toml
/// cache_mode = "singleton"
///
/// [[bindings]]
/// capability = "ProductParser"
/// component = "ProductParserImpl"
///
/// [[bindings]]
/// capability = "FileReaderService"
/// component = "FileReaderServiceImpl"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Instance reuse policy
    #[serde(default)]
    pub cache_mode: CacheMode,
    /// Capability bindings
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

impl ContainerConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> DiResult<Self> {
        toml::from_str(toml_str)
            .map_err(|e| ContainerError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> DiResult<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| ContainerError::Config(format!("Failed to parse JSON: {}", e)))
    }

    /// Apply this configuration to a container builder
    ///
    /// Bindings are applied by name; targets that are not registered
    /// components fail at resolve time, not here.
    pub fn apply_to_builder(&self, builder: &mut ContainerBuilder) {
        builder.cache_mode(self.cache_mode);
        for binding in &self.bindings {
            builder.bind_name(&binding.capability, &binding.component);
        }
    }
}
