//! In-memory loader

use crate::error::RepositoryError;
use crate::traits::DocumentLoader;
use std::collections::HashMap;

/// Loader backed by a map of key to document text
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    documents: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_document(mut self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(key, content);
        self
    }

    /// Store `content` under `key`, replacing any previous document
    pub fn insert(&mut self, key: impl Into<String>, content: impl Into<String>) {
        self.documents.insert(key.into(), content.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.documents.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryLoader {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            documents: iter
                .into_iter()
                .map(|(key, content)| (key.into(), content.into()))
                .collect(),
        }
    }
}

impl DocumentLoader for MemoryLoader {
    fn load(&self, key: &str) -> anyhow::Result<String> {
        tracing::debug!("Loading document '{}' from memory", key);
        self.documents.get(key).cloned().ok_or_else(|| {
            RepositoryError::NotFound {
                key: key.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_known_and_unknown_keys() {
        let loader = MemoryLoader::new().with_document("a.json", "{}");
        assert_eq!(loader.load("a.json").unwrap(), "{}");

        let err = loader.load("b.json").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::NotFound { key }) if key == "b.json"
        ));
    }

    #[test]
    fn test_from_iterator() {
        let loader: MemoryLoader = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(loader.len(), 2);
        assert!(loader.contains("b"));
    }
}
