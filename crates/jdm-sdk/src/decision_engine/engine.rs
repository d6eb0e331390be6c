//! DecisionEngine implementation

use super::decision::Decision;
use super::loader_cache::LoaderCache;
use super::types::{EvaluationOptions, EvaluationResult};
use crate::builder::DecisionEngineBuilder;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use jdm_core::{Document, Value};
use jdm_parser::DocumentParser;
use jdm_repository::DocumentLoader;
use std::fmt;
use std::sync::Arc;

/// Main decision engine
///
/// Cheap to clone; clones share the loader and the loader cache.
///
/// # Example
///
/// ```
/// use jdm_sdk::{DecisionEngine, EvaluationOptions, MemoryLoader};
/// use serde_json::json;
///
/// let doubler = json!({
///     "nodes": [
///         {"id": "in", "type": "inputNode"},
///         {"id": "calc", "type": "expressionNode",
///          "content": {"expressions": [{"key": "result", "value": "input.value * 2"}]}},
///         {"id": "out", "type": "outputNode"}
///     ],
///     "edges": [
///         {"id": "e1", "sourceId": "in", "targetId": "calc"},
///         {"id": "e2", "sourceId": "calc", "targetId": "out"}
///     ]
/// });
///
/// let engine = DecisionEngine::with_loader(
///     MemoryLoader::new().with_document("doubler.json", doubler.to_string()),
/// );
/// let decision = engine.get_decision("doubler.json").unwrap();
/// let result = decision
///     .evaluate(json!({"value": 21}), EvaluationOptions::default())
///     .unwrap();
///
/// assert_eq!(serde_json::Value::from(result.output), json!({"result": 42}));
/// ```
#[derive(Clone)]
pub struct DecisionEngine {
    inner: Arc<EngineInner>,
}

/// State shared by an engine and every decision it creates
pub(crate) struct EngineInner {
    pub(crate) config: EngineConfig,
    loader: Option<Arc<dyn DocumentLoader>>,
    cache: LoaderCache,
}

impl DecisionEngine {
    /// Create an engine without a loader
    pub fn new(config: EngineConfig) -> Self {
        Self::from_parts(config, None)
    }

    /// Create an engine with default configuration and the given loader
    pub fn with_loader(loader: impl DocumentLoader + 'static) -> Self {
        Self::from_parts(EngineConfig::default(), Some(Arc::new(loader)))
    }

    pub fn builder() -> DecisionEngineBuilder {
        DecisionEngineBuilder::new()
    }

    pub(crate) fn from_parts(
        config: EngineConfig,
        loader: Option<Arc<dyn DocumentLoader>>,
    ) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                config,
                loader,
                cache: LoaderCache::new(),
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Evaluation options built from the engine configuration
    pub fn default_options(&self) -> EvaluationOptions {
        EvaluationOptions::new().with_trace(self.inner.config.default_trace)
    }

    /// Compile document text into a reusable decision
    pub fn create_decision(&self, content: &str) -> Result<Decision> {
        let document = DocumentParser::parse(content)?;
        tracing::debug!(
            "Created decision with {} nodes and {} edges",
            document.nodes().len(),
            document.edges().len()
        );
        Ok(Decision::new(Arc::new(document), self.inner.clone(), None))
    }

    /// Compile and evaluate in one call.
    ///
    /// Behaves exactly like `create_decision(content)?.evaluate(..)`; the
    /// compiled document is dropped afterwards and never cached.
    pub fn evaluate(
        &self,
        content: &str,
        context: impl Into<Value>,
        options: EvaluationOptions,
    ) -> Result<EvaluationResult> {
        self.create_decision(content)?.evaluate(context, options)
    }

    /// Load a decision by key through the loader and the loader cache
    pub fn get_decision(&self, key: &str) -> Result<Decision> {
        let document = self.inner.resolve(key, None)?;
        Ok(Decision::new(document, self.inner.clone(), Some(key.to_string())))
    }

    /// Keys of the decisions held by the loader cache, sorted
    pub fn cached_keys(&self) -> Vec<String> {
        self.inner.cache.keys()
    }

    pub fn has_loader(&self) -> bool {
        self.inner.loader.is_some()
    }
}

impl EngineInner {
    /// Resolve a reference key to a parsed document.
    ///
    /// `node_id` names the referencing node for error reporting.
    pub(crate) fn resolve(&self, key: &str, node_id: Option<&str>) -> Result<Arc<Document>> {
        let loader = self
            .loader
            .as_deref()
            .ok_or_else(|| EngineError::NoLoaderConfigured {
                node_id: node_id.map(str::to_string),
            })?;

        if !self.config.cache_decisions {
            return load_document(loader, key);
        }
        self.cache.get_or_load(key, || load_document(loader, key))
    }
}

fn load_document(loader: &dyn DocumentLoader, key: &str) -> Result<Arc<Document>> {
    tracing::info!("Loading decision '{}'", key);

    let text = loader.load(key).map_err(|cause| {
        tracing::warn!("Loader failed for '{}': {}", key, cause);
        EngineError::Loader {
            key: key.to_string(),
            cause,
        }
    })?;

    let document = DocumentParser::parse(&text).map_err(|e| {
        tracing::warn!("Decision '{}' failed to parse: {}", key, e);
        EngineError::from(e)
    })?;
    Ok(Arc::new(document))
}

impl fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("config", &self.inner.config)
            .field("has_loader", &self.has_loader())
            .field("cached_keys", &self.cached_keys())
            .finish()
    }
}
