//! Loader capability
//!
//! The engine resolves `decisionNode` references by asking a
//! [`DocumentLoader`] for the referenced document's text. Loaders are plain
//! synchronous calls into caller code; any error they return is reported as
//! a loader failure for that key.

/// Source of decision document text, keyed by the reference found in a
/// decision node
pub trait DocumentLoader: Send + Sync {
    /// Return the raw text of the document stored under `key`
    fn load(&self, key: &str) -> anyhow::Result<String>;
}

impl<L: DocumentLoader + ?Sized> DocumentLoader for std::sync::Arc<L> {
    fn load(&self, key: &str) -> anyhow::Result<String> {
        (**self).load(key)
    }
}

impl<L: DocumentLoader + ?Sized> DocumentLoader for Box<L> {
    fn load(&self, key: &str) -> anyhow::Result<String> {
        (**self).load(key)
    }
}
