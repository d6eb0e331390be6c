//! Type system for JDM runtime values

pub mod value;

pub use value::Value;
