//! Caching modules for performance optimization.

pub mod tree_cache;

// Re-export commonly used types
pub use tree_cache::TreeCache;
