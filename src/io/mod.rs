//! I/O modules for scene loading.

pub mod file_loader;
pub mod async_loader;

// Re-export commonly used types
pub use file_loader::LoadingState;
pub use async_loader::{AsyncLoader, LoadResult};
