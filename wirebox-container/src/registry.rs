//! Dependency registries: the two key spaces of a container.
//!
//! [`NameRegistry`] maps explicit string names to slots, [`TypeRegistry`]
//! maps [`DependencyKey`]s to slots and keeps a bare-name index next to
//! them. Both apply the same [`Settings`] policy on registration.

use std::collections::HashMap;

use tracing::{debug, trace, warn};
use wirebox_support::rendering::suggest_similar;

use crate::error::{AlreadyRegisteredError, InjectorError, NotFoundError};
use crate::key::DependencyKey;
use crate::provider::{Provider, Slot};
use crate::settings::Settings;

const MAX_SUGGESTIONS: usize = 3;

/// Slots registered under explicit names.
#[derive(Debug, Default)]
pub(crate) struct NameRegistry {
    slots: HashMap<String, Slot>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under `name`.
    ///
    /// # Errors
    /// - [`InjectorError::EmptyName`] if `name` is empty and
    ///   `strict_names` is set.
    /// - [`InjectorError::AlreadyRegistered`] if `name` is taken and
    ///   `allow_override` is off.
    pub fn register(
        &mut self,
        name: String,
        provider: Provider,
        settings: &Settings,
    ) -> Result<(), InjectorError> {
        if settings.strict_names && name.is_empty() {
            warn!(key = %provider.key(), "Rejected registration with empty name");
            return Err(InjectorError::EmptyName);
        }

        let replaced = self.slots.contains_key(&name);
        if replaced && !settings.allow_override {
            warn!(name = %name, "Rejected duplicate named registration");
            return Err(InjectorError::AlreadyRegistered(AlreadyRegisteredError {
                key: name,
            }));
        }

        debug!(
            name = %name,
            key = %provider.key(),
            kind = provider.kind(),
            replaced,
            "Registered named dependency"
        );
        self.slots.insert(name, Slot::from(provider));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Slot> {
        trace!(name, "Looking up named dependency");
        self.slots.get(name)
    }

    /// Builds the not-found error for `name`, with suggestions.
    pub fn not_found(&self, name: &str) -> InjectorError {
        InjectorError::NotFound(NotFoundError {
            requested: name.to_string(),
            suggestions: suggest_similar(name, self.slots.keys().map(String::as_str), MAX_SUGGESTIONS),
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Slots registered by type, plus the bare-name index.
///
/// The index is maintained at registration time. When two types share a
/// bare name (`a::Database` and `b::Database`), the one registered most
/// recently owns the name; the other stays reachable by exact key.
#[derive(Debug, Default)]
pub(crate) struct TypeRegistry {
    slots: HashMap<DependencyKey, Slot>,
    bare_names: HashMap<String, DependencyKey>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under its own key.
    ///
    /// # Errors
    /// [`InjectorError::AlreadyRegistered`] if the type is taken and
    /// `allow_override` is off.
    pub fn register(&mut self, provider: Provider, settings: &Settings) -> Result<(), InjectorError> {
        let key = *provider.key();

        let replaced = self.slots.contains_key(&key);
        if replaced && !settings.allow_override {
            warn!(key = %key, "Rejected duplicate type registration");
            return Err(InjectorError::AlreadyRegistered(AlreadyRegisteredError {
                key: key.type_name().to_string(),
            }));
        }

        let bare = key.bare_name();
        debug!(
            key = %key,
            bare_name = %bare,
            kind = provider.kind(),
            replaced,
            "Registered typed dependency"
        );
        if let Some(previous) = self.bare_names.insert(bare, key).filter(|prev| *prev != key) {
            debug!(previous = %previous, key = %key, "Bare name now points to a different type");
        }
        self.slots.insert(key, Slot::from(provider));
        Ok(())
    }

    /// Exact lookup by type identity.
    pub fn get(&self, key: &DependencyKey) -> Option<&Slot> {
        trace!(key = %key, "Looking up typed dependency");
        self.slots.get(key)
    }

    /// Lookup through the bare-name index.
    pub fn get_by_bare_name(&self, name: &str) -> Option<&Slot> {
        trace!(bare_name = name, "Looking up dependency by bare name");
        self.bare_names.get(name).and_then(|key| self.slots.get(key))
    }

    /// Exact lookup first, then the bare name of `key`.
    pub fn lookup(&self, key: &DependencyKey) -> Option<&Slot> {
        self.get(key).or_else(|| self.get_by_bare_name(&key.bare_name()))
    }

    /// Builds the not-found error for `key`, with suggestions.
    pub fn not_found(&self, key: &DependencyKey) -> InjectorError {
        InjectorError::NotFound(NotFoundError {
            requested: key.type_name().to_string(),
            suggestions: suggest_similar(
                key.type_name(),
                self.slots.keys().map(DependencyKey::type_name),
                MAX_SUGGESTIONS,
            ),
        })
    }

    pub fn contains(&self, key: &DependencyKey) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}
