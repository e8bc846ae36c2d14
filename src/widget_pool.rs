//! Reuse pool for visual-element handles.
//!
//! Widget instantiation is the expensive operation the renderer avoids: a row
//! scrolling out of view releases its widget back to the pool instead of
//! destroying it, and the next row scrolling in picks it up again. Each row
//! remembers the slot it used last frame and asks for it back as its
//! preferred slot, so a steady viewport keeps stable row-to-widget pairing.

use crate::error::HierarchyError;

/// Index of a widget inside a pool. Stable for the lifetime of the pool.
pub type WidgetSlot = usize;

/// Minimal interface the pool needs from a widget handle.
///
/// `set_active(false)` corresponds to hiding the visual element without
/// destroying it; the pool never drops a widget once instantiated.
pub trait PoolWidget {
    fn set_active(&mut self, active: bool);
}

/// Lifecycle counters for one pool, shown in the viewer's status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Widgets currently handed out.
    pub in_use: usize,
    /// Widgets instantiated but currently idle.
    pub pooled: usize,
}

/// Generic reuse pool.
///
/// The used and free sets are always disjoint (`in_use` is the authoritative
/// flag; the free list may carry stale entries that are skipped lazily), and
/// the total widget count only grows for the lifetime of the pool.
#[derive(Debug)]
pub struct WidgetPool<W> {
    widgets: Vec<W>,
    in_use: Vec<bool>,
    free: Vec<WidgetSlot>,
}

impl<W: PoolWidget> WidgetPool<W> {
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
            in_use: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Hands out a widget slot, preferring `preferred` when it is still free,
    /// falling back to any free slot, and instantiating a new widget through
    /// `instantiate` only when the pool is exhausted.
    ///
    /// The chosen widget is activated before the slot is returned.
    pub fn acquire(
        &mut self,
        preferred: Option<WidgetSlot>,
        instantiate: impl FnOnce() -> W,
    ) -> WidgetSlot {
        let slot = match preferred {
            Some(p) if p < self.in_use.len() && !self.in_use[p] => p,
            _ => loop {
                match self.free.pop() {
                    // Stale entries appear when a slot was handed out through
                    // the preferred path; skip them.
                    Some(s) if self.in_use[s] => continue,
                    Some(s) => break s,
                    None => {
                        self.widgets.push(instantiate());
                        self.in_use.push(false);
                        break self.widgets.len() - 1;
                    }
                }
            },
        };
        self.in_use[slot] = true;
        self.widgets[slot].set_active(true);
        slot
    }

    /// Returns a widget to the free set, deactivating it.
    ///
    /// Fails with [`HierarchyError::DoubleRelease`] if the slot is not
    /// currently handed out.
    pub fn release(&mut self, slot: WidgetSlot) -> Result<(), HierarchyError> {
        if !self.in_use.get(slot).copied().unwrap_or(false) {
            return Err(HierarchyError::DoubleRelease { slot });
        }
        self.in_use[slot] = false;
        self.widgets[slot].set_active(false);
        self.free.push(slot);
        Ok(())
    }

    /// Deactivates and frees every outstanding widget in one pass.
    ///
    /// Runs once per render cycle before re-acquiring, so widgets left over
    /// from the previous frame return to the pool instead of being destroyed.
    pub fn release_all(&mut self) {
        for slot in 0..self.in_use.len() {
            if self.in_use[slot] {
                self.in_use[slot] = false;
                self.widgets[slot].set_active(false);
                self.free.push(slot);
            }
        }
    }

    pub fn get(&self, slot: WidgetSlot) -> Option<&W> {
        self.widgets.get(slot)
    }

    pub fn get_mut(&mut self, slot: WidgetSlot) -> Option<&mut W> {
        self.widgets.get_mut(slot)
    }

    /// Total widgets ever instantiated (used + pooled).
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Iterates over the widgets currently handed out.
    pub fn iter_active(&self) -> impl Iterator<Item = (WidgetSlot, &W)> {
        self.widgets
            .iter()
            .enumerate()
            .filter(|(i, _)| self.in_use[*i])
    }

    pub fn stats(&self) -> PoolStats {
        let in_use = self.in_use.iter().filter(|&&u| u).count();
        PoolStats {
            in_use,
            pooled: self.widgets.len() - in_use,
        }
    }
}

impl<W: PoolWidget> Default for WidgetPool<W> {
    fn default() -> Self {
        Self::new()
    }
}
