//! Utility modules for the outliner viewer.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_count, get_current_memory_mb, format_memory_mb};
