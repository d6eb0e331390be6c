//! Compiled decisions

use super::engine::EngineInner;
use super::graph_evaluator::GraphEvaluator;
use super::types::{EvaluationOptions, EvaluationResult};
use crate::error::Result;
use jdm_core::{Document, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// A compiled, reusable decision.
///
/// The document is immutable, so one `Decision` may be evaluated from many
/// threads at once.
#[derive(Clone)]
pub struct Decision {
    document: Arc<Document>,
    engine: Arc<EngineInner>,
    /// Loader key, for decisions obtained through the loader
    key: Option<String>,
}

impl Decision {
    pub(crate) fn new(document: Arc<Document>, engine: Arc<EngineInner>, key: Option<String>) -> Self {
        Self {
            document,
            engine,
            key,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Evaluate the decision against `context`.
    ///
    /// Any node failure aborts the call. With tracing on, the error is
    /// wrapped in [`EngineError::Traced`](crate::EngineError::Traced) carrying
    /// the trace up to and including the failing node.
    pub fn evaluate(
        &self,
        context: impl Into<Value>,
        options: EvaluationOptions,
    ) -> Result<EvaluationResult> {
        let context = context.into();
        let started = Instant::now();

        // Seed the reference stack with our own key so self references are cycles
        let mut stack: Vec<String> = self.key.iter().cloned().collect();
        let evaluated =
            GraphEvaluator::new(&self.engine, &options, &mut stack).run(&self.document, &context)?;

        Ok(EvaluationResult {
            output: evaluated.output,
            performance: started.elapsed(),
            trace: evaluated.trace,
        })
    }
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("key", &self.key)
            .field("nodes", &self.document.nodes().len())
            .finish()
    }
}
