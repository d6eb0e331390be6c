//! Loader cache
//!
//! Maps reference keys to parsed documents for the lifetime of an engine.
//! The first caller for a key runs the load; concurrent callers for the same
//! key block on its cell and then share the result.

use crate::error::Result;
use dashmap::DashMap;
use jdm_core::Document;
use once_cell::sync::OnceCell;
use std::sync::Arc;

type Slot = Arc<OnceCell<Arc<Document>>>;

#[derive(Default)]
pub(crate) struct LoaderCache {
    entries: DashMap<String, Slot>,
}

impl LoaderCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Return the cached document for `key`, running `load` on a miss.
    ///
    /// A failed load leaves the slot empty, so a later call tries again.
    pub(crate) fn get_or_load<F>(&self, key: &str, load: F) -> Result<Arc<Document>>
    where
        F: FnOnce() -> Result<Arc<Document>>,
    {
        // Clone the slot out so the shard lock is released before loading
        let slot: Slot = self.entries.entry(key.to_string()).or_default().clone();

        if let Some(document) = slot.get() {
            tracing::trace!("Loader cache hit for '{}'", key);
            return Ok(document.clone());
        }

        slot.get_or_try_init(load).cloned()
    }

    /// Keys whose documents have been loaded, sorted
    pub(crate) fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }
}
