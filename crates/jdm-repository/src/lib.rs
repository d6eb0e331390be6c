//! JDM Repository - document loaders
//!
//! Decision documents reference each other by key. The engine turns a key
//! into document text through a [`DocumentLoader`]; this crate defines that
//! capability and ships the loaders most callers need:
//!
//! - [`MemoryLoader`]: documents held in a map, handy for tests and embedding
//! - [`FileSystemLoader`]: documents stored as files below a root directory
//! - [`FnLoader`]: any closure `Fn(&str) -> anyhow::Result<String>`

pub mod error;
pub mod file_system;
pub mod function;
pub mod memory;
pub mod traits;

pub use error::{RepositoryError, RepositoryResult};
pub use file_system::FileSystemLoader;
pub use function::FnLoader;
pub use memory::MemoryLoader;
pub use traits::DocumentLoader;
