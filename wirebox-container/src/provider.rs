//! Providers (what gets registered) and slots (what the container keeps).
//!
//! A [`Provider`] is either a ready [`Instance`] or a factory that will
//! produce one. Registration turns it into a [`Slot`], which owns the
//! one-way Factory → Instance transition.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::debug;

use crate::container::Container;
use crate::error::{InjectorError, Result};
use crate::key::DependencyKey;

/// A type-erased, shared dependency value.
///
/// Two resolutions return the *same* instance when their `Arc`s are
/// [`Arc::ptr_eq`].
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Type alias for factory functions.
///
/// A factory runs at most once. It receives the container so it can
/// resolve its own dependencies.
pub type FactoryFn = Box<dyn FnOnce(&Container) -> Instance + Send>;

/// A dependency ready to be registered.
///
/// The key is always the type of the value the provider yields, whether
/// it already exists or will be produced by the factory.
///
/// # Examples
/// ```
/// use wirebox_container::provider::Provider;
///
/// struct Database { name: String }
///
/// let eager = Provider::instance(Database { name: "db".into() });
/// let lazy = Provider::factory(|| Database { name: "db".into() });
/// assert_eq!(eager.key(), lazy.key());
/// assert!(lazy.is_factory());
/// ```
pub enum Provider {
    /// An already constructed value.
    Instance { key: DependencyKey, value: Instance },
    /// A deferred constructor, invoked on first resolution.
    Factory { key: DependencyKey, factory: FactoryFn },
}

impl Provider {
    /// Wraps an already constructed value.
    pub fn instance<T: Send + Sync + 'static>(value: T) -> Self {
        Self::shared(Arc::new(value))
    }

    /// Wraps a value that is already shared.
    ///
    /// Resolving it hands out clones of this very `Arc`.
    pub fn shared<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Provider::Instance {
            key: DependencyKey::of::<T>(),
            value,
        }
    }

    /// Wraps a zero-argument factory.
    pub fn factory<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        Self::factory_with(move |_: &Container| factory())
    }

    /// Wraps a factory that resolves its own dependencies from the container.
    ///
    /// ```rust,ignore
    /// Provider::factory_with(|c: &Container| UserRepository {
    ///     db: c.must_resolve_type::<Database>(),
    /// })
    /// ```
    pub fn factory_with<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: FnOnce(&Container) -> T + Send + 'static,
    {
        Provider::Factory {
            key: DependencyKey::of::<T>(),
            factory: Box::new(move |container: &Container| Arc::new(factory(container)) as Instance),
        }
    }

    /// Returns the key of the value this provider yields.
    pub fn key(&self) -> &DependencyKey {
        match self {
            Provider::Instance { key, .. } | Provider::Factory { key, .. } => key,
        }
    }

    /// Returns `true` for a factory provider.
    pub fn is_factory(&self) -> bool {
        matches!(self, Provider::Factory { .. })
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Provider::Instance { .. } => "instance",
            Provider::Factory { .. } => "factory",
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("kind", &self.kind())
            .field("key", self.key())
            .finish()
    }
}

/// A registered entry, owned by a registry.
///
/// Holds either a value or the factory that will produce it. The cell is
/// filled exactly once: concurrent first resolutions block on the cell
/// while one of them runs the factory.
pub(crate) struct Slot {
    key: DependencyKey,
    cell: OnceCell<Instance>,
    factory: Mutex<Option<FactoryFn>>,
}

impl Slot {
    /// Key of the value held (or to be produced) by this slot.
    pub fn key(&self) -> &DependencyKey {
        &self.key
    }

    /// `true` once the slot holds a value.
    pub fn is_materialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Returns the value, running the factory first if needed.
    ///
    /// The factory is taken out of the slot before it runs, so it is
    /// dropped once the value is cached.
    pub fn resolve(&self, container: &Container) -> Result<Instance> {
        self.cell
            .get_or_try_init(|| -> Result<Instance> {
                let factory = self
                    .factory
                    .lock()
                    .take()
                    .ok_or_else(|| InjectorError::FactoryReturnedNothing(self.key.to_string()))?;

                debug!(key = %self.key, "Materializing factory");
                Ok(factory(container))
            })
            .cloned()
    }
}

impl From<Provider> for Slot {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Instance { key, value } => Slot {
                key,
                cell: OnceCell::with_value(value),
                factory: Mutex::new(None),
            },
            Provider::Factory { key, factory } => Slot {
                key,
                cell: OnceCell::new(),
                factory: Mutex::new(Some(factory)),
            },
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("key", &self.key)
            .field("materialized", &self.is_materialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug)]
    struct Database {
        name: String,
    }

    #[test]
    fn instance_provider_keyed_by_value_type() {
        let provider = Provider::instance(Database { name: "db".into() });
        assert_eq!(*provider.key(), DependencyKey::of::<Database>());
        assert!(!provider.is_factory());
    }

    #[test]
    fn factory_provider_keyed_by_return_type() {
        let provider = Provider::factory(|| Database { name: "db".into() });
        assert_eq!(*provider.key(), DependencyKey::of::<Database>());
        assert!(provider.is_factory());
    }

    #[test]
    fn shared_provider_returns_same_arc() {
        let db = Arc::new(Database { name: "db".into() });
        let slot = Slot::from(Provider::shared(db.clone()));
        let container = Container::new();

        let resolved = slot.resolve(&container).unwrap();
        let resolved = resolved.downcast::<Database>().unwrap();
        assert!(Arc::ptr_eq(&db, &resolved));
        assert_eq!(resolved.name, "db");
    }

    #[test]
    fn factory_slot_runs_once_and_caches() {
        let calls = Arc::new(AtomicU32::new(0));
        let slot = Slot::from(Provider::factory({
            let calls = calls.clone();
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                Database { name: "db".into() }
            }
        }));
        let container = Container::new();

        assert!(!slot.is_materialized());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let first = slot.resolve(&container).unwrap();
        let second = slot.resolve(&container).unwrap();

        assert!(slot.is_materialized());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(slot.factory.lock().is_none());
    }

    #[test]
    fn panicked_factory_leaves_nothing_behind() {
        let slot = Slot::from(Provider::factory(|| -> Database { panic!("connection refused") }));
        let container = Container::new();

        let outcome = catch_unwind(AssertUnwindSafe(|| slot.resolve(&container)));
        assert!(outcome.is_err());

        match slot.resolve(&container) {
            Err(InjectorError::FactoryReturnedNothing(key)) => assert!(key.contains("Database")),
            other => panic!("Expected FactoryReturnedNothing, got: {other:?}"),
        }
    }

    #[test]
    fn debug_shows_kind() {
        let provider = Provider::factory(|| 1u8);
        let debug = format!("{provider:?}");
        assert!(debug.contains("factory"));
        assert!(debug.contains("u8"));
    }
}
