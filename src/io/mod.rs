//! I/O modules for forest loading and generation.

pub mod async_loader;
pub mod file_loader;

pub use async_loader::{AsyncLoader, LoadResult};
pub use file_loader::LoadingState;
