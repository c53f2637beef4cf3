//! Type identification keys.
//!
//! [`DependencyKey`] is the type-descriptor token the type registry is
//! keyed by. It is captured once, at registration time, from the static
//! type of the value (or of the factory's return value).

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use wirebox_support::rendering::bare_type_name;

/// Identifies a dependency type in the container.
///
/// Equality and hashing use the [`TypeId`] only; the type name is kept
/// for error messages and for the bare-name index.
///
/// # Examples
/// ```
/// use wirebox_container::key::DependencyKey;
///
/// let key = DependencyKey::of::<String>();
/// assert_eq!(key.type_name(), "alloc::string::String");
/// assert_eq!(key.bare_name(), "String");
/// ```
#[derive(Clone, Copy)]
pub struct DependencyKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl DependencyKey {
    /// Creates a key for type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of this dependency.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the fully qualified type name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the bare name: namespace and one indirection level stripped.
    pub fn bare_name(&self) -> String {
        bare_type_name(self.type_name)
    }
}

impl PartialEq for DependencyKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for DependencyKey {}

impl Hash for DependencyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DependencyKey({})", self.type_name)
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Database;

    #[test]
    fn key_of_type() {
        let key = DependencyKey::of::<Database>();
        assert!(key.type_name().ends_with("::Database"));
        assert_eq!(key.bare_name(), "Database");
    }

    #[test]
    fn key_equality_same_type() {
        assert_eq!(DependencyKey::of::<String>(), DependencyKey::of::<String>());
    }

    #[test]
    fn key_inequality_different_types() {
        assert_ne!(DependencyKey::of::<String>(), DependencyKey::of::<i32>());
        assert_ne!(
            DependencyKey::of::<Database>(),
            DependencyKey::of::<Arc<Database>>()
        );
    }

    #[test]
    fn wrapped_type_shares_bare_name() {
        assert_eq!(
            DependencyKey::of::<Arc<Database>>().bare_name(),
            DependencyKey::of::<Database>().bare_name()
        );
    }

    #[test]
    fn key_in_hashmap() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(DependencyKey::of::<String>(), "string");
        map.insert(DependencyKey::of::<i32>(), "i32");
        assert_eq!(map.get(&DependencyKey::of::<String>()), Some(&"string"));
        assert_eq!(map.get(&DependencyKey::of::<bool>()), None);
    }

    #[test]
    fn display_is_full_type_name() {
        assert_eq!(DependencyKey::of::<i32>().to_string(), "i32");
    }
}
