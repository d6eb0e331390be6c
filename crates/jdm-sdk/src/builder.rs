//! Builder pattern for DecisionEngine

use crate::config::EngineConfig;
use crate::decision_engine::DecisionEngine;
use crate::error::Result;
use jdm_repository::{DocumentLoader, FnLoader};
use std::sync::Arc;

/// Builder for DecisionEngine
///
/// # Example
///
/// ```rust,no_run
/// use jdm_sdk::{DecisionEngineBuilder, FileSystemLoader};
///
/// let engine = DecisionEngineBuilder::new()
///     .with_loader(FileSystemLoader::new("rules")?)
///     .with_max_depth(5)
///     .build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Default)]
pub struct DecisionEngineBuilder {
    config: EngineConfig,
    loader: Option<Arc<dyn DocumentLoader>>,
}

impl DecisionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the loader used to resolve decision references
    pub fn with_loader(mut self, loader: impl DocumentLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Use a closure as the loader
    pub fn with_loader_fn<F>(self, load_fn: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.with_loader(FnLoader::new(load_fn))
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn cache_decisions(mut self, enable: bool) -> Self {
        self.config.cache_decisions = enable;
        self
    }

    pub fn default_trace(mut self, enable: bool) -> Self {
        self.config.default_trace = enable;
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<DecisionEngine> {
        self.config.validate()?;
        tracing::debug!("Building decision engine: {:?}", self.config);
        Ok(DecisionEngine::from_parts(self.config, self.loader))
    }
}
