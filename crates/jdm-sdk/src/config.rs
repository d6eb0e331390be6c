//! Configuration types for DecisionEngine

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Default bound on nested decision references
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Main engine configuration
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```
/// use jdm_sdk::EngineConfig;
///
/// let config = EngineConfig::from_yaml("max_depth: 4").unwrap();
/// assert_eq!(config.max_depth, 4);
/// assert!(config.cache_decisions);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum nesting of decision references in one evaluation
    pub max_depth: usize,

    /// Keep loaded decisions for the engine's lifetime. When disabled the
    /// loader is called on every reference.
    pub cache_decisions: bool,

    /// Trace flag used by the engine's default evaluation options
    pub default_trace: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cache_decisions: true,
            default_trace: false,
        }
    }

    /// Load configuration from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_yaml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn cache_decisions(mut self, enable: bool) -> Self {
        self.cache_decisions = enable;
        self
    }

    pub fn default_trace(mut self, enable: bool) -> Self {
        self.default_trace = enable;
        self
    }

    /// Check option values
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(EngineError::Config(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
