//! Process-wide descriptor cache
//!
//! Descriptors are resolved on first use and kept for the lifetime of the
//! process. A failed resolution is cached too, so a broken model declaration
//! reports the same error on every call without being resolved again.

use crate::descriptor::ModelDescriptor;
use crate::errors::AdapterError;
use crate::traits::TableModel;
use cache_system::{CacheStats, TypeCache};
use std::sync::{Arc, LazyLock};

type Resolved = Result<Arc<ModelDescriptor>, AdapterError>;

static DESCRIPTORS: LazyLock<TypeCache<Resolved>> = LazyLock::new(TypeCache::new);

/// The descriptor for `T`, resolving it on first use
pub fn descriptor_for<T: TableModel>() -> Result<Arc<ModelDescriptor>, AdapterError> {
    DESCRIPTORS.get_or_init::<T>(|| ModelDescriptor::resolve::<T>().map(Arc::new))
}

/// Whether `T` has already been resolved (successfully or not)
pub fn is_resolved<T: TableModel>() -> bool {
    DESCRIPTORS.contains::<T>()
}

/// Hit and initialization counters of the descriptor cache
pub fn registry_stats() -> CacheStats {
    DESCRIPTORS.stats()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_models::{Counted, Misdeclared, User, COUNTED_RESOLUTIONS};
    use std::sync::atomic::Ordering;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_same_descriptor_is_returned() {
        let first = descriptor_for::<User>().unwrap();
        let second = descriptor_for::<User>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(is_resolved::<User>());
    }

    #[test]
    fn test_resolution_error_is_cached() {
        let first = descriptor_for::<Misdeclared>().unwrap_err();
        let second = descriptor_for::<Misdeclared>().unwrap_err();
        assert_eq!(first, second);
        assert!(first.is_structural());
    }

    #[test]
    fn test_concurrent_first_resolution_runs_once() {
        const THREADS: usize = 12;
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    descriptor_for::<Counted>().unwrap()
                })
            })
            .collect();

        let descriptors: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(COUNTED_RESOLUTIONS.load(Ordering::SeqCst), 1);
        assert!(descriptors.iter().all(|d| Arc::ptr_eq(d, &descriptors[0])));
    }
}
