//! Closure-backed loader

use crate::traits::DocumentLoader;
use std::fmt;

/// Adapts a closure `Fn(&str) -> anyhow::Result<String>` into a loader
///
/// ```
/// use jdm_repository::{DocumentLoader, FnLoader};
///
/// let loader = FnLoader::new(|key: &str| {
///     anyhow::ensure!(key == "only.json", "unknown key {}", key);
///     Ok(r#"{"nodes": [], "edges": []}"#.to_string())
/// });
/// assert!(loader.load("only.json").is_ok());
/// assert!(loader.load("other.json").is_err());
/// ```
pub struct FnLoader<F> {
    load_fn: F,
}

impl<F> FnLoader<F>
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    pub fn new(load_fn: F) -> Self {
        Self { load_fn }
    }
}

impl<F> DocumentLoader for FnLoader<F>
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    fn load(&self, key: &str) -> anyhow::Result<String> {
        (self.load_fn)(key)
    }
}

impl<F> fmt::Debug for FnLoader<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnLoader").finish_non_exhaustive()
    }
}
