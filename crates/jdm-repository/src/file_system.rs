//! File system based loader

use crate::error::{RepositoryError, RepositoryResult};
use crate::traits::DocumentLoader;
use path_absolutize::Absolutize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Loads documents from files below a root directory
///
/// Keys are relative paths such as `fees/standard.json`. Keys that are
/// absolute or that climb out of the root are rejected.
#[derive(Debug, Clone)]
pub struct FileSystemLoader {
    /// Root path of the document tree
    root_path: PathBuf,
}

impl FileSystemLoader {
    /// Create a loader rooted at `root_path`
    ///
    /// # Example
    /// ```no_run
    /// use jdm_repository::FileSystemLoader;
    ///
    /// let loader = FileSystemLoader::new("rules").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(root_path: P) -> RepositoryResult<Self> {
        let path = root_path.as_ref();

        if !path.is_dir() {
            return Err(RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        let root_path = path.absolutize()?.to_path_buf();
        Ok(Self { root_path })
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Resolve a key to a file path below the root
    fn resolve_path(&self, key: &str) -> RepositoryResult<PathBuf> {
        let relative = Path::new(key);
        let escapes = relative.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if key.is_empty() || escapes {
            return Err(RepositoryError::PathTraversal {
                key: key.to_string(),
            });
        }

        let path = self.root_path.join(relative).absolutize()?.to_path_buf();
        if !path.starts_with(&self.root_path) {
            return Err(RepositoryError::PathTraversal {
                key: key.to_string(),
            });
        }
        Ok(path)
    }

    fn read(&self, key: &str) -> RepositoryResult<String> {
        let path = self.resolve_path(key)?;
        tracing::debug!("Loading document '{}' from {}", key, path.display());

        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RepositoryError::NotFound {
                key: key.to_string(),
            },
            _ => RepositoryError::Io(e),
        })?;

        String::from_utf8(bytes).map_err(|_| RepositoryError::InvalidEncoding {
            key: key.to_string(),
        })
    }
}

impl DocumentLoader for FileSystemLoader {
    fn load(&self, key: &str) -> anyhow::Result<String> {
        Ok(self.read(key)?)
    }
}
