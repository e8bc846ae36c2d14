//! Display-name interning.
//!
//! A scene re-reports every object's name on every resync, and most names
//! never change ("Cube", "Light", "Player"...). Interning hands back shared
//! `Arc<str>` references so repeated resyncs and large scene files do not
//! re-allocate the same strings over and over.

use std::collections::HashMap;
use std::sync::Arc;

/// Interning pool for display names.
///
/// # Examples
///
/// ```
/// use rhier::NamePool;
/// use std::sync::Arc;
///
/// let mut names = NamePool::new();
/// let a = names.intern("Cube");
/// let b = names.intern("Cube");
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct NamePool {
    pool: HashMap<String, Arc<str>>,
}

impl NamePool {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Pre-sizes the pool; useful when the expected number of distinct names
    /// is known (e.g. when parsing a scene file).
    pub fn with_capacity(capacity: usize) -> Self {
        NamePool {
            pool: HashMap::with_capacity(capacity),
        }
    }

    /// Interns a name, returning a shared reference.
    pub fn intern(&mut self, name: &str) -> Arc<str> {
        if let Some(interned) = self.pool.get(name) {
            Arc::clone(interned)
        } else {
            let arc: Arc<str> = Arc::from(name);
            self.pool.insert(name.to_string(), Arc::clone(&arc));
            arc
        }
    }

    /// Number of distinct names interned.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Drops all interned names. Outstanding `Arc`s stay valid.
    pub fn clear(&mut self) {
        self.pool.clear();
    }
}

impl Default for NamePool {
    fn default() -> Self {
        Self::new()
    }
}
