//! Rendering subsystem for the outliner viewer.
//!
//! - Row host (pooled egui row widgets behind the engine's widget traits)
//! - Text utilities (measurement and truncation)

pub mod row_host;
pub mod text_utils;
