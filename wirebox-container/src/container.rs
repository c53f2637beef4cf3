//! # The Container: heart of Wirebox
//!
//! One container holds two registries side by side:
//!
//! ```text
//!                 ┌── NameRegistry  "database" ──> Slot
//! Container ──────┤
//!                 └── TypeRegistry  Database   ──> Slot
//!                                   "Database" ──> (bare-name index)
//! ```
//!
//! A slot starts out holding either a value or a factory. The first
//! resolution of a factory slot runs the factory and caches the result,
//! so every later resolution returns the same `Arc`.
//!
//! Registration needs `&mut Container`; resolution only needs `&Container`
//! and is safe to share between threads once wiring is done.
//!
//! # Examples
//! ```rust
//! use wirebox_container::prelude::*;
//!
//! struct Database {
//!     name: String,
//! }
//!
//! let mut container = Container::new();
//! container
//!     .register("database", Provider::factory(|| Database { name: "db".into() }))
//!     .expect("registration failed");
//!
//! let first = container.resolve("database").unwrap();
//! let second = container.resolve("database").unwrap();
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//!
//! let db = container.resolve_named::<Database>("database").unwrap();
//! assert_eq!(db.name, "db");
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{info, instrument, trace};
use wirebox_support::rendering::bare_type_name;

use crate::error::{InjectorError, OrAbort, Result};
use crate::key::DependencyKey;
use crate::provider::{Instance, Provider};
use crate::registry::{NameRegistry, TypeRegistry};
use crate::settings::Settings;
use crate::typed::{Typed, downcast};

// ============================================================
// ContainerBuilder
// ============================================================

/// Builds a [`Container`] from settings and queued registrations.
///
/// Registrations are applied in order by [`build()`](ContainerBuilder::build),
/// which stops at the first one the settings reject.
///
/// # Examples
/// ```rust,ignore
/// let container = Container::builder()
///     .allow_override(false)
///     .register("config", Provider::instance(Config::load()))
///     .register_type(Provider::factory(Database::connect))
///     .build()?;
/// ```
pub struct ContainerBuilder {
    settings: Settings,
    pending: Vec<Pending>,
}

enum Pending {
    Named(String, Provider),
    Typed(Provider),
}

impl ContainerBuilder {
    fn new() -> Self {
        Self {
            settings: Settings::default(),
            pending: Vec::new(),
        }
    }

    /// Replace all settings at once.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Reject empty registration names.
    pub fn strict_names(mut self, strict: bool) -> Self {
        self.settings.strict_names = strict;
        self
    }

    /// Allow overriding previously registered dependencies.
    pub fn allow_override(mut self, allow: bool) -> Self {
        self.settings.allow_override = allow;
        self
    }

    /// Queue a registration under an explicit name.
    pub fn register(mut self, name: impl Into<String>, provider: Provider) -> Self {
        self.pending.push(Pending::Named(name.into(), provider));
        self
    }

    /// Queue a registration keyed by the provider's type.
    pub fn register_type(mut self, provider: Provider) -> Self {
        self.pending.push(Pending::Typed(provider));
        self
    }

    /// Build the container, applying queued registrations in order.
    ///
    /// # Errors
    /// The first registration rejected by the settings
    /// ([`InjectorError::EmptyName`] or [`InjectorError::AlreadyRegistered`]).
    #[instrument(skip(self), name = "container_build")]
    pub fn build(self) -> Result<Container> {
        info!(queued = self.pending.len(), "Building container");

        let mut container = Container::with_settings(self.settings);
        for pending in self.pending {
            match pending {
                Pending::Named(name, provider) => container.register(name, provider)?,
                Pending::Typed(provider) => container.register_type(provider)?,
            }
        }

        info!(registered = container.len(), "Container built");
        Ok(container)
    }
}

impl fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("settings", &self.settings)
            .field("queued", &self.pending.len())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Container
// ═══════════════════════════════════════════

/// Name- and type-keyed dependency container.
pub struct Container {
    names: NameRegistry,
    types: TypeRegistry,
    settings: Settings,
}

impl Container {
    /// Create an empty container with default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create an empty container with the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            names: NameRegistry::new(),
            types: TypeRegistry::new(),
            settings,
        }
    }

    /// Create a new builder.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── By name ──

    /// Register a provider under `name`.
    ///
    /// With default settings this never fails and a second registration
    /// under the same name replaces the first.
    pub fn register(&mut self, name: impl Into<String>, provider: Provider) -> Result<()> {
        self.names.register(name.into(), provider, &self.settings)
    }

    /// Resolve a dependency by name.
    ///
    /// A factory entry is invoked on first resolution and its value cached.
    ///
    /// # Errors
    /// [`InjectorError::NotFound`] if nothing is registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Instance> {
        trace!(name, "Resolving by name");
        let slot = self.names.get(name).ok_or_else(|| self.names.not_found(name))?;
        slot.resolve(self)
    }

    /// Resolve a dependency by name and downcast it to `T`.
    ///
    /// ```rust,ignore
    /// let db: Arc<Database> = container.resolve_named("database")?;
    /// ```
    pub fn resolve_named<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>> {
        let slot = self.names.get(name).ok_or_else(|| self.names.not_found(name))?;
        downcast(slot.resolve(self)?, slot.key())
    }

    /// Resolve a dependency by name, panicking if it cannot be resolved.
    ///
    /// For startup wiring only. See [`OrAbort`].
    #[track_caller]
    pub fn must_resolve(&self, name: &str) -> Instance {
        self.resolve(name).or_abort()
    }

    // ── By type ──

    /// Register a provider keyed by the type of value it yields.
    pub fn register_type(&mut self, provider: Provider) -> Result<()> {
        self.types.register(provider, &self.settings)
    }

    /// Resolve by exact type identity.
    ///
    /// # Errors
    /// [`InjectorError::NotFound`] if `key` is not registered.
    pub fn resolve_by_type_exact(&self, key: &DependencyKey) -> Result<Instance> {
        trace!(key = %key, "Resolving by exact type");
        let slot = self.types.get(key).ok_or_else(|| self.types.not_found(key))?;
        slot.resolve(self)
    }

    /// Resolve by bare type name, e.g. `"Database"`.
    ///
    /// A qualified name such as `"my_app::Database"` is reduced to its
    /// bare name first.
    ///
    /// # Errors
    /// [`InjectorError::NoDependencyForTypeName`] if no registered type
    /// has that bare name.
    pub fn resolve_by_type_name(&self, name: &str) -> Result<Instance> {
        let bare = bare_type_name(name);
        trace!(bare_name = %bare, "Resolving by type name");
        let slot = self
            .types
            .get_by_bare_name(&bare)
            .ok_or_else(|| InjectorError::NoDependencyForTypeName(name.to_string()))?;
        slot.resolve(self)
    }

    /// Resolve `T`, by exact type first and by bare name second.
    ///
    /// Shortcut for `for_type::<T>(self).resolve()`.
    pub fn resolve_type<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        Typed::<T>::new(self).resolve()
    }

    /// Resolve `T`, panicking if it cannot be resolved.
    #[track_caller]
    pub fn must_resolve_type<T: Send + Sync + 'static>(&self) -> Arc<T> {
        Typed::<T>::new(self).must_resolve()
    }

    /// Resolve `T` and store it in `target`.
    ///
    /// `target` is left untouched when resolution fails.
    ///
    /// ```rust,ignore
    /// let mut db: Option<Arc<Database>> = None;
    /// container.resolve_into(&mut db)?;
    /// ```
    pub fn resolve_into<T: Send + Sync + 'static>(&self, target: &mut Option<Arc<T>>) -> Result<()> {
        *target = Some(self.resolve_type::<T>()?);
        Ok(())
    }

    // ── Introspection ──

    /// Total number of registrations, by name and by type.
    pub fn len(&self) -> usize {
        self.names.len() + self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.get(name).is_some()
    }

    /// `true` if `T` is registered under its exact type.
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.types.contains(&DependencyKey::of::<T>())
    }

    /// `true` if the entry named `name` already holds a value, i.e. it was
    /// registered as an instance or its factory has run.
    /// `false` for unknown names.
    pub fn is_materialized(&self, name: &str) -> bool {
        self.names.get(name).is_some_and(|slot| slot.is_materialized())
    }

    pub(crate) fn types(&self) -> &TypeRegistry {
        &self.types
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("named", &self.names.len())
            .field("typed", &self.types.len())
            .field("settings", &self.settings)
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Container, ContainerBuilder};
    pub use crate::error::{InjectorError, OrAbort, Result};
    pub use crate::invoke::{FromContainer, Injectable, InvokeOutput};
    pub use crate::key::DependencyKey;
    pub use crate::provider::{Instance, Provider};
    pub use crate::settings::Settings;
    pub use crate::typed::{Typed, for_type, get, must};
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
