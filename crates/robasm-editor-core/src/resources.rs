//! Load-once asset cache with a readiness signal.
//!
//! The cache never loads anything itself. `request` tells the caller which
//! identifiers still need a load started; the caller reports back through
//! `mark_loaded` / `mark_failed`. When the last outstanding load settles the
//! queued ready callbacks are handed back, drained, for the caller to run
//! once its own borrows are released.

use std::collections::HashMap;
use std::fmt;

use smol_str::SmolStr;

/// Callback run when every requested asset has settled.
pub type ReadyCallback = Box<dyn FnOnce()>;

/// Load state of a single identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    Unknown,
    Loading,
    Loaded,
    Failed,
}

enum Slot<A> {
    Loading,
    Loaded(A),
    Failed,
}

impl<A> Slot<A> {
    fn state(&self) -> ResourceState {
        match self {
            Slot::Loading => ResourceState::Loading,
            Slot::Loaded(_) => ResourceState::Loaded,
            Slot::Failed => ResourceState::Failed,
        }
    }
}

pub struct ResourceCache<A> {
    slots: HashMap<SmolStr, Slot<A>>,
    ready_callbacks: Vec<ReadyCallback>,
}

impl<A> Default for ResourceCache<A> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            ready_callbacks: Vec::new(),
        }
    }
}

impl<A> fmt::Debug for ResourceCache<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCache")
            .field("assets", &self.slots.len())
            .field("pending", &self.pending())
            .field("ready_callbacks", &self.ready_callbacks.len())
            .finish()
    }
}

impl<A> ResourceCache<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register identifiers and return the ones whose load must start now.
    ///
    /// Identifiers already known (loading, loaded or failed) are skipped,
    /// as are repeats within `ids`.
    pub fn request<I, S>(&mut self, ids: I) -> Vec<SmolStr>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut to_load = Vec::new();
        for id in ids {
            let id = SmolStr::new(id.as_ref());
            if self.slots.contains_key(&id) {
                continue;
            }
            self.slots.insert(id.clone(), Slot::Loading);
            to_load.push(id);
        }
        if !to_load.is_empty() {
            tracing::debug!(new = to_load.len(), pending = self.pending(), "resources requested");
        }
        to_load
    }

    /// Store a finished asset.
    ///
    /// Returns the ready callbacks if this completed the last outstanding
    /// load; the caller must invoke them. A second load of the same id is
    /// ignored.
    pub fn mark_loaded(&mut self, id: &str, asset: A) -> Vec<ReadyCallback> {
        self.settle(id, Slot::Loaded(asset))
    }

    /// Record a failed load. Failed assets count as settled for readiness
    /// but `get` keeps returning `None` for them.
    pub fn mark_failed(&mut self, id: &str) -> Vec<ReadyCallback> {
        self.settle(id, Slot::Failed)
    }

    fn settle(&mut self, id: &str, slot: Slot<A>) -> Vec<ReadyCallback> {
        let was_pending = self.pending() > 0;
        match self.state(id) {
            ResourceState::Loading => {}
            ResourceState::Unknown => tracing::debug!(id, "settling unrequested resource"),
            ResourceState::Loaded | ResourceState::Failed => {
                tracing::trace!(id, "resource already settled, ignoring");
                return Vec::new();
            }
        }
        if matches!(slot, Slot::Failed) {
            tracing::warn!(id, "resource failed to load");
        }
        self.slots.insert(SmolStr::new(id), slot);

        if was_pending && self.is_ready() {
            tracing::debug!(
                assets = self.slots.len(),
                callbacks = self.ready_callbacks.len(),
                "resources ready"
            );
            std::mem::take(&mut self.ready_callbacks)
        } else {
            Vec::new()
        }
    }

    /// True once every requested identifier has settled.
    pub fn is_ready(&self) -> bool {
        self.pending() == 0
    }

    /// Number of loads still outstanding.
    pub fn pending(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot, Slot::Loading))
            .count()
    }

    /// Queue a callback for the next time the cache becomes ready.
    ///
    /// If it is ready already the callback is handed straight back.
    pub fn on_ready(&mut self, callback: ReadyCallback) -> Option<ReadyCallback> {
        if self.is_ready() {
            Some(callback)
        } else {
            self.ready_callbacks.push(callback);
            None
        }
    }

    /// The loaded asset, or `None` while it is unknown, loading or failed.
    pub fn get(&self, id: &str) -> Option<&A> {
        match self.slots.get(id) {
            Some(Slot::Loaded(asset)) => Some(asset),
            _ => None,
        }
    }

    pub fn state(&self, id: &str) -> ResourceState {
        self.slots
            .get(id)
            .map(Slot::state)
            .unwrap_or(ResourceState::Unknown)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn counter() -> (Rc<Cell<usize>>, ReadyCallback) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, Box::new(move || c.set(c.get() + 1)))
    }

    fn run(callbacks: Vec<ReadyCallback>) {
        for cb in callbacks {
            cb();
        }
    }

    #[test]
    fn test_ready_fires_once_after_last_load() {
        let mut cache: ResourceCache<u32> = ResourceCache::new();
        let to_load = cache.request(["tile0_0", "tile1_0", "tile2_3"]);
        assert_eq!(to_load.len(), 3);

        let (count, cb) = counter();
        assert!(cache.on_ready(cb).is_none());

        run(cache.mark_loaded("tile0_0", 0));
        assert_eq!(count.get(), 0);
        run(cache.mark_loaded("tile1_0", 1));
        assert_eq!(count.get(), 0);
        assert!(!cache.is_ready());

        run(cache.mark_loaded("tile2_3", 2));
        assert_eq!(count.get(), 1);
        assert!(cache.is_ready());

        // a late duplicate completion must not fire again
        run(cache.mark_loaded("tile2_3", 9));
        assert_eq!(count.get(), 1);
        assert_eq!(cache.get("tile2_3"), Some(&2));
    }

    #[test]
    fn test_rerequest_is_noop() {
        let mut cache: ResourceCache<&str> = ResourceCache::new();
        assert_eq!(cache.request(["a"]), vec![SmolStr::new("a")]);
        assert!(cache.request(["a"]).is_empty());

        run(cache.mark_loaded("a", "asset"));
        assert!(cache.request(["a", "a"]).is_empty());
        assert_eq!(cache.len(), 1);
        assert!(cache.is_ready());
    }

    #[test]
    fn test_duplicates_within_one_request() {
        let mut cache: ResourceCache<()> = ResourceCache::new();
        let to_load = cache.request(vec!["x", "y", "x"]);
        assert_eq!(to_load, vec![SmolStr::new("x"), SmolStr::new("y")]);
        assert_eq!(cache.pending(), 2);
    }

    #[test]
    fn test_lookup_sentinel() {
        let mut cache: ResourceCache<u8> = ResourceCache::new();
        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.state("missing"), ResourceState::Unknown);

        cache.request(["img"]);
        assert_eq!(cache.get("img"), None);
        assert_eq!(cache.state("img"), ResourceState::Loading);

        run(cache.mark_loaded("img", 7));
        assert_eq!(cache.get("img"), Some(&7));
        assert_eq!(cache.state("img"), ResourceState::Loaded);
    }

    #[test]
    fn test_failed_load_settles() {
        let mut cache: ResourceCache<u8> = ResourceCache::new();
        cache.request(["ok", "broken"]);
        let (count, cb) = counter();
        cache.on_ready(cb);

        run(cache.mark_loaded("ok", 1));
        run(cache.mark_failed("broken"));

        assert_eq!(count.get(), 1);
        assert!(cache.is_ready());
        assert_eq!(cache.get("broken"), None);
        assert_eq!(cache.state("broken"), ResourceState::Failed);
    }

    #[test]
    fn test_late_failure_after_load_is_ignored() {
        let mut cache: ResourceCache<u8> = ResourceCache::new();
        cache.request(["a"]);
        let (count, cb) = counter();
        cache.on_ready(cb);
        run(cache.mark_loaded("a", 5));
        assert_eq!(count.get(), 1);

        assert!(cache.mark_failed("a").is_empty());
        assert_eq!(cache.state("a"), ResourceState::Loaded);
        assert_eq!(cache.get("a"), Some(&5));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_on_ready_when_already_ready() {
        let mut cache: ResourceCache<u8> = ResourceCache::new();
        assert!(cache.is_ready());
        let (count, cb) = counter();
        let immediate = cache.on_ready(cb);
        assert!(immediate.is_some());
        if let Some(cb) = immediate {
            cb();
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_new_request_rearms_readiness() {
        let mut cache: ResourceCache<u8> = ResourceCache::new();
        cache.request(["a"]);
        let (first, cb) = counter();
        cache.on_ready(cb);
        run(cache.mark_loaded("a", 1));
        assert_eq!(first.get(), 1);

        cache.request(["b"]);
        assert!(!cache.is_ready());
        let (second, cb) = counter();
        assert!(cache.on_ready(cb).is_none());
        run(cache.mark_loaded("b", 2));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }
}
