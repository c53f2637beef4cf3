//! Type-safe resolution.
//!
//! [`Typed<T>`] binds a container to one target type. Lookup tries the
//! exact type first, then the bare name of `T`. A bare-name match on a
//! different type, such as `Arc<Database>` or another crate's `Database`
//! when asked for `Database`, is found but reported as
//! [`InjectorError::TypeMismatch`]: the value must be exactly a `T`.
//! Register a value already held in an `Arc` with
//! [`Provider::shared`](crate::provider::Provider::shared), which keys it
//! by the inner type.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::trace;

use crate::container::Container;
use crate::error::{InjectorError, OrAbort, Result};
use crate::key::DependencyKey;
use crate::provider::Instance;

/// A resolver bound to target type `T`.
///
/// # Examples
/// ```
/// use wirebox_container::prelude::*;
///
/// struct Database { name: String }
///
/// let mut container = Container::new();
/// container
///     .register_type(Provider::factory(|| Database { name: "db".into() }))
///     .unwrap();
///
/// let db = for_type::<Database>(&container).resolve().unwrap();
/// assert_eq!(db.name, "db");
/// ```
pub struct Typed<'c, T> {
    container: &'c Container,
    _marker: PhantomData<fn() -> T>,
}

impl<'c, T: Send + Sync + 'static> Typed<'c, T> {
    pub fn new(container: &'c Container) -> Self {
        Self {
            container,
            _marker: PhantomData,
        }
    }

    /// Resolve `T`.
    ///
    /// # Errors
    /// - [`InjectorError::NotFoundForType`] if neither `T` nor its bare
    ///   name is registered.
    /// - [`InjectorError::TypeMismatch`] if the bare-name match holds a
    ///   value of another type.
    pub fn resolve(&self) -> Result<Arc<T>> {
        let key = DependencyKey::of::<T>();
        trace!(key = %key, "Resolving typed dependency");

        let slot = self
            .container
            .types()
            .lookup(&key)
            .ok_or(InjectorError::NotFoundForType(key.type_name()))?;

        downcast(slot.resolve(self.container)?, slot.key())
    }

    /// Resolve `T`, panicking if it cannot be resolved.
    #[track_caller]
    pub fn must_resolve(&self) -> Arc<T> {
        self.resolve().or_abort()
    }
}

impl<T> fmt::Debug for Typed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("target", &type_name::<T>())
            .finish()
    }
}

/// Bind `container` to target type `T`.
pub fn for_type<T: Send + Sync + 'static>(container: &Container) -> Typed<'_, T> {
    Typed::new(container)
}

/// Resolve `T` from `container`.
///
/// ```rust,ignore
/// let db: Arc<Database> = get(&container)?;
/// ```
pub fn get<T: Send + Sync + 'static>(container: &Container) -> Result<Arc<T>> {
    Typed::<T>::new(container).resolve()
}

/// Resolve `T` from `container`, panicking if it cannot be resolved.
#[track_caller]
pub fn must<T: Send + Sync + 'static>(container: &Container) -> Arc<T> {
    Typed::<T>::new(container).must_resolve()
}

/// Narrow a resolved value to `T`.
pub(crate) fn downcast<T: Send + Sync + 'static>(value: Instance, found: &DependencyKey) -> Result<Arc<T>> {
    value
        .downcast::<T>()
        .map_err(|_| InjectorError::TypeMismatch {
            expected: type_name::<T>(),
            found: found.type_name(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[derive(Debug)]
    struct Database {
        name: String,
    }

    fn new_db() -> Database {
        Database { name: "db".into() }
    }

    mod legacy {
        pub struct Database;
    }

    #[test]
    fn resolve_instance_is_same_arc() {
        let db = Arc::new(Database { name: "test-db".into() });
        let mut container = Container::new();
        container.register_type(Provider::shared(db.clone())).unwrap();

        let resolved = for_type::<Database>(&container).resolve().unwrap();
        assert!(Arc::ptr_eq(&db, &resolved));
        assert_eq!(resolved.name, "test-db");
    }

    #[test]
    fn resolve_factory_is_singleton() {
        let mut container = Container::new();
        container.register_type(Provider::factory(new_db)).unwrap();

        let first = must::<Database>(&container);
        let second = must::<Database>(&container);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn not_found_mentions_type() {
        let container = Container::new();

        let err = get::<Database>(&container).unwrap_err();
        assert!(matches!(err, InjectorError::NotFoundForType(_)));
        assert!(err.to_string().contains("no dependency found for type"));
        assert!(err.to_string().contains("Database"));
    }

    #[test]
    fn must_resolve_aborts_on_missing() {
        let container = Container::new();

        let payload = catch_unwind(AssertUnwindSafe(|| for_type::<Database>(&container).must_resolve()))
            .unwrap_err();
        assert!(matches!(
            *payload.downcast::<InjectorError>().unwrap(),
            InjectorError::NotFoundForType(_)
        ));
    }

    #[test]
    fn bare_name_fallback_reaches_other_type_and_reports_mismatch() {
        let mut container = Container::new();
        container.register_type(Provider::instance(legacy::Database)).unwrap();

        match get::<Database>(&container) {
            Err(InjectorError::TypeMismatch { expected, found }) => {
                assert!(expected.ends_with("Database"));
                assert!(found.contains("legacy"));
            }
            other => panic!("Expected TypeMismatch, got: {other:?}"),
        }
    }

    #[test]
    fn arc_wrapped_instance_is_a_mismatch_but_shared_resolves() {
        let mut container = Container::new();
        container
            .register_type(Provider::instance(Arc::new(new_db())))
            .unwrap();

        match get::<Database>(&container) {
            Err(InjectorError::TypeMismatch { found, .. }) => assert!(found.contains("Arc<")),
            other => panic!("Expected TypeMismatch, got: {other:?}"),
        }

        let db = Arc::new(new_db());
        container.register_type(Provider::shared(db.clone())).unwrap();
        assert!(Arc::ptr_eq(&db, &get::<Database>(&container).unwrap()));
    }

    #[test]
    fn exact_match_wins_over_bare_name() {
        let mut container = Container::new();
        container.register_type(Provider::factory(new_db)).unwrap();
        container.register_type(Provider::instance(legacy::Database)).unwrap();

        // bare name "Database" now belongs to legacy::Database
        let db = get::<Database>(&container).unwrap();
        assert_eq!(db.name, "db");
    }

    #[test]
    fn debug_shows_target() {
        let container = Container::new();
        let typed = for_type::<Database>(&container);
        assert!(format!("{typed:?}").contains("Database"));
    }
}
