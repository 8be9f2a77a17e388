//! Config store adapters
//!
//! Both stores keep an application map and one map per user. The file store
//! persists the same shape as JSON.

mod document;
mod file_store;
mod memory_store;

pub use file_store::FileConfigStore;
pub use memory_store::InMemoryConfigStore;
