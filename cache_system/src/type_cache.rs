//! Type-keyed cache implementation
//!
//! Each type gets its own `OnceLock` slot. The slot map is guarded by an
//! `RwLock` that is held only to find or insert a slot, never while a value
//! is being computed, so resolving one type does not block readers of others.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Counters describing cache usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from an already published value
    pub hits: u64,
    /// Lookups that ran the initializer
    pub initializations: u64,
}

/// Cache of one value per Rust type, initialised at most once per type
pub struct TypeCache<V> {
    slots: RwLock<HashMap<TypeId, Arc<OnceLock<V>>>>,
    hits: AtomicU64,
    initializations: AtomicU64,
}

impl<V> Debug for TypeCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCache")
            .field("entries", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

impl<V> Default for TypeCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TypeCache<V> {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            initializations: AtomicU64::new(0),
        }
    }

    /// Number of types with a slot (published or being initialised)
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            initializations: self.initializations.load(Ordering::Relaxed),
        }
    }

    /// Whether a value has been published for `K`
    pub fn contains<K: ?Sized + 'static>(&self) -> bool {
        self.existing_slot(TypeId::of::<K>())
            .is_some_and(|slot| slot.get().is_some())
    }

    fn existing_slot(&self, id: TypeId) -> Option<Arc<OnceLock<V>>> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn slot(&self, id: TypeId) -> Arc<OnceLock<V>> {
        if let Some(slot) = self.existing_slot(id) {
            return slot;
        }

        // Slots are only ever inserted, so a poisoned map is still consistent
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.entry(id).or_default().clone()
    }
}

impl<V: Clone> TypeCache<V> {
    /// Get the published value for `K`, if any
    pub fn get<K: ?Sized + 'static>(&self) -> Option<V> {
        self.existing_slot(TypeId::of::<K>())
            .and_then(|slot| slot.get().cloned())
    }

    /// Get the value for `K`, running `init` if nothing has been published yet.
    ///
    /// Concurrent callers for the same type block until the single running
    /// initializer finishes and then all observe its result.
    pub fn get_or_init<K: ?Sized + 'static>(&self, init: impl FnOnce() -> V) -> V {
        let slot = self.slot(TypeId::of::<K>());

        if let Some(value) = slot.get() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return value.clone();
        }

        let mut ran_init = false;
        let value = slot
            .get_or_init(|| {
                ran_init = true;
                debug_log!("initialising cache entry for {}", std::any::type_name::<K>());
                init()
            })
            .clone();

        if ran_init {
            self.initializations.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    struct First;
    struct Second;

    #[test]
    fn test_value_is_computed_once() {
        let cache = TypeCache::<u32>::new();
        assert_eq!(cache.get_or_init::<First>(|| 1), 1);
        assert_eq!(cache.get_or_init::<First>(|| 2), 1);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                initializations: 1
            }
        );
    }

    #[test]
    fn test_types_have_separate_slots() {
        let cache = TypeCache::<&'static str>::new();
        cache.get_or_init::<First>(|| "first");
        cache.get_or_init::<Second>(|| "second");

        assert_eq!(cache.get::<First>(), Some("first"));
        assert_eq!(cache.get::<Second>(), Some("second"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_before_init() {
        let cache = TypeCache::<u32>::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get::<First>(), None);
        assert!(!cache.contains::<First>());
    }

    #[test]
    fn test_errors_are_cached_like_values() {
        let cache = TypeCache::<Result<u32, String>>::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let result = cache.get_or_init::<First>(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("bad declaration".to_string())
            });
            assert_eq!(result, Err("bad declaration".to_string()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_access_publishes_one_value() {
        const THREADS: usize = 16;

        let cache = Arc::new(TypeCache::<Arc<usize>>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_init::<First>(|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(10));
                        Arc::new(i)
                    })
                })
            })
            .collect();

        let results: Vec<Arc<usize>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
        assert_eq!(cache.stats().initializations, 1);
        assert_eq!(cache.stats().hits, (THREADS - 1) as u64);
    }
}
