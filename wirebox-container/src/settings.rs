//! Container settings.
//!
//! The default settings give the baseline overwrite-and-store behavior:
//! any name is accepted and a later registration replaces an earlier one.
//! Strictness is opt-in.
//!
//! Settings derive [`Deserialize`] so an application can keep them in
//! its own configuration file:
//!
//! ```toml
//! [container]
//! strict_names = true
//! allow_override = false
//! ```

use serde::Deserialize;

/// Registration policy for a [`Container`](crate::container::Container).
///
/// # Examples
/// ```
/// use wirebox_container::settings::Settings;
///
/// let lenient = Settings::default();
/// assert!(!lenient.strict_names);
/// assert!(lenient.allow_override);
///
/// let strict = Settings::strict();
/// assert!(strict.strict_names);
/// assert!(!strict.allow_override);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reject empty registration names with `EmptyName`.
    pub strict_names: bool,
    /// Let a later registration replace an earlier one under the same key.
    /// When `false`, the second registration fails with `AlreadyRegistered`.
    pub allow_override: bool,
}

impl Settings {
    /// Both checks enabled.
    pub fn strict() -> Self {
        Self {
            strict_names: true,
            allow_override: false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strict_names: false,
            allow_override: true,
        }
    }
}
