//! Storage Adapters
//!
//! Implementations of the `PoolMedium` trait.

mod file;
mod memory;

pub use file::JsonFilePoolMedium;
pub use memory::InMemoryPoolMedium;
