//! Singleton registry
//!
//! One slot per tag. A slot is created on first access and filled exactly
//! once; concurrent first accesses block until the single construction
//! finishes and then share its result.

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A type with at most one live instance per [`SingletonRegistry`]
pub trait Singleton: Send + Sync + Sized + 'static {
    /// Unique slot tag
    const TAG: &'static str;

    /// Construct the instance; runs at most once per registry
    ///
    /// Must not call back into the same registry for `Self`.
    fn create() -> Self;
}

/// Singleton errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SingletonError {
    /// Two types declared the same tag
    #[error("singleton tag `{tag}` is held by {existing}, requested as {requested}")]
    TagConflict {
        /// Contested tag
        tag: &'static str,
        /// Type that first claimed the tag
        existing: &'static str,
        /// Type that was requested
        requested: &'static str,
    },
}

type Instance = Arc<dyn Any + Send + Sync>;

struct Slot {
    type_id: TypeId,
    type_name: &'static str,
    cell: OnceCell<Instance>,
}

impl Slot {
    fn of<T: Singleton>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            cell: OnceCell::new(),
        }
    }

    fn check<T: Singleton>(&self) -> Result<(), SingletonError> {
        if self.type_id == TypeId::of::<T>() {
            Ok(())
        } else {
            Err(self.conflict::<T>())
        }
    }

    fn conflict<T: Singleton>(&self) -> SingletonError {
        SingletonError::TagConflict {
            tag: T::TAG,
            existing: self.type_name,
            requested: type_name::<T>(),
        }
    }
}

/// Owner of singleton slots
///
/// Share the registry itself by `Arc`; every handle returned by
/// [`get_instance`](Self::get_instance) for one type points at the same
/// instance for as long as the registry lives.
#[derive(Default)]
pub struct SingletonRegistry {
    slots: DashMap<&'static str, Arc<Slot>>,
}

impl SingletonRegistry {
    /// Create new registry with no slots
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The instance of `T`, constructing it on first access
    ///
    /// # Errors
    /// [`SingletonError::TagConflict`] if another type already claimed
    /// `T::TAG`.
    pub fn get_instance<T: Singleton>(&self) -> Result<Arc<T>, SingletonError> {
        // Clone the slot out so the map shard lock is released before construction
        let slot = Arc::clone(
            self.slots
                .entry(T::TAG)
                .or_insert_with(|| Arc::new(Slot::of::<T>()))
                .value(),
        );
        slot.check::<T>()?;

        let instance = slot.cell.get_or_init(|| {
            tracing::info!(tag = T::TAG, type_name = slot.type_name, "constructing singleton");
            Arc::new(T::create()) as Instance
        });

        Arc::clone(instance)
            .downcast::<T>()
            .map_err(|_| slot.conflict::<T>())
    }

    /// Check if `T` has been constructed
    #[must_use]
    pub fn is_initialized<T: Singleton>(&self) -> bool {
        self.slots.get(T::TAG).is_some_and(|slot| {
            slot.type_id == TypeId::of::<T>() && slot.cell.get().is_some()
        })
    }

    /// Number of constructed instances
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.value().cell.get().is_some())
            .count()
    }

    /// Check if nothing has been constructed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tags of constructed instances, sorted
    #[must_use]
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = self
            .slots
            .iter()
            .filter(|slot| slot.value().cell.get().is_some())
            .map(|slot| *slot.key())
            .collect();
        tags.sort_unstable();
        tags
    }
}

impl fmt::Debug for SingletonRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    #[derive(Debug, Default)]
    struct Counter {
        hits: AtomicUsize,
    }

    impl Singleton for Counter {
        const TAG: &'static str = "counter";

        fn create() -> Self {
            Self::default()
        }
    }

    #[derive(Debug)]
    struct Sequential;

    static SEQUENTIAL_CREATED: AtomicUsize = AtomicUsize::new(0);

    impl Singleton for Sequential {
        const TAG: &'static str = "sequential";

        fn create() -> Self {
            SEQUENTIAL_CREATED.fetch_add(1, Ordering::SeqCst);
            Self
        }
    }

    #[derive(Debug)]
    struct Impostor;

    impl Singleton for Impostor {
        const TAG: &'static str = "counter";

        fn create() -> Self {
            Self
        }
    }

    #[derive(Debug)]
    struct Slow;

    static SLOW_CREATED: AtomicUsize = AtomicUsize::new(0);

    impl Singleton for Slow {
        const TAG: &'static str = "slow";

        fn create() -> Self {
            SLOW_CREATED.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(20));
            Self
        }
    }

    #[test]
    fn same_instance_every_time() {
        let registry = SingletonRegistry::new();
        let a = registry.get_instance::<Counter>().unwrap();
        let b = registry.get_instance::<Counter>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        a.hits.fetch_add(1, Ordering::SeqCst);
        assert_eq!(b.hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn repeated_access_constructs_once() {
        let registry = SingletonRegistry::new();
        for _ in 0..16 {
            registry.get_instance::<Sequential>().unwrap();
        }
        assert_eq!(SEQUENTIAL_CREATED.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn separate_registries_hold_separate_instances() {
        let first = SingletonRegistry::new();
        let second = SingletonRegistry::new();
        let a = first.get_instance::<Counter>().unwrap();
        let b = second.get_instance::<Counter>().unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn tag_conflict() {
        let registry = SingletonRegistry::new();
        registry.get_instance::<Counter>().unwrap();

        let err = registry.get_instance::<Impostor>().unwrap_err();
        assert!(matches!(err, SingletonError::TagConflict { tag: "counter", .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn tag_conflict_before_construction() {
        let registry = SingletonRegistry::new();
        registry.get_instance::<Impostor>().unwrap();
        assert!(registry.get_instance::<Counter>().is_err());
        assert!(!registry.is_initialized::<Counter>());
        assert!(registry.is_initialized::<Impostor>());
    }

    #[test]
    fn lazy_until_first_access() {
        let registry = SingletonRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.is_initialized::<Counter>());

        registry.get_instance::<Counter>().unwrap();
        assert!(registry.is_initialized::<Counter>());
        assert_eq!(registry.tags(), vec!["counter"]);
    }

    #[test]
    fn concurrent_first_access_constructs_once() {
        let registry = Arc::new(SingletonRegistry::new());
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    registry.get_instance::<Slow>().unwrap()
                })
            })
            .collect();

        let instances: Vec<Arc<Slow>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(SLOW_CREATED.load(Ordering::SeqCst), 1);
        assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
