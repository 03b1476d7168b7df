//! Derived data of a tree, computed on first use.

use std::cell::OnceCell;
use tracing::trace;

/// A lazily computed value stamped with the tree generation it was built for.
///
/// Reading goes through `&self`, resetting requires `&mut self`. Since every
/// tree mutation takes `&mut Tree` and resets all caches, a value can never
/// be read against a different generation than it was built for.
#[derive(Debug, Clone)]
pub(crate) struct GenCache<T> {
    name: &'static str,
    cell: OnceCell<(u64, T)>,
}

impl<T> GenCache<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceCell::new(),
        }
    }

    /// Returns the cached value, building it for `generation` if missing.
    pub(crate) fn get_or_build<F>(&self, generation: u64, build: F) -> &T
    where
        F: FnOnce() -> T,
    {
        let (stamp, value) = self.cell.get_or_init(|| {
            trace!(cache = self.name, generation, "building cache");
            (generation, build())
        });
        debug_assert_eq!(*stamp, generation, "stale {} cache", self.name);
        value
    }

    /// Generation of the cached value, `None` if nothing is cached.
    #[cfg(test)]
    pub(crate) fn stamp(&self) -> Option<u64> {
        self.cell.get().map(|(stamp, _)| *stamp)
    }

    pub(crate) fn invalidate(&mut self) {
        self.cell.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_builds_once_per_generation() {
        let calls = Cell::new(0);
        let mut cache = GenCache::new("test");
        assert_eq!(cache.stamp(), None);

        let build = || {
            calls.set(calls.get() + 1);
            calls.get() * 10
        };
        assert_eq!(*cache.get_or_build(0, build), 10);
        assert_eq!(*cache.get_or_build(0, build), 10);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.stamp(), Some(0));

        cache.invalidate();
        assert_eq!(cache.stamp(), None);
        assert_eq!(*cache.get_or_build(1, build), 20);
        assert_eq!(cache.stamp(), Some(1));
    }
}
