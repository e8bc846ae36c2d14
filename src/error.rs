//! Typed errors surfaced by the layout engine.

use thiserror::Error;

/// Errors raised by structural walks and the widget pools.
///
/// Both variants indicate internal inconsistency rather than bad input:
/// a cyclic parent chain means the shadow tree was corrupted and the caller
/// should force a full resync; a double release is a programmer error in the
/// render path and is surfaced immediately instead of being retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// Root finding revisited a layout slot while walking parent links.
    #[error("parent chain starting at layout slot {slot} is cyclic")]
    StructuralCycle {
        /// The slot at which the walk detected the revisit.
        slot: usize,
    },

    /// A widget slot was released while not in the pool's used set.
    #[error("widget slot {slot} released while not in use")]
    DoubleRelease {
        /// The offending pool slot.
        slot: usize,
    },
}
