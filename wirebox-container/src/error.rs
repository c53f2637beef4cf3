//! Error types for container operations.
//!
//! Every resolution path returns [`Result`]. Escalating a failure into
//! a panic is always an explicit call to [`OrAbort::or_abort`].

use std::fmt;

use tracing::error;

/// Main error type for all container operations.
#[derive(Debug, thiserror::Error)]
pub enum InjectorError {
    /// Nothing is registered under the requested name or type key.
    #[error("{}", .0)]
    NotFound(NotFoundError),

    /// No registered type has the requested bare name.
    #[error("no dependency found for type name '{0}'")]
    NoDependencyForTypeName(String),

    /// Neither the exact type nor its bare name is registered.
    #[error("no dependency found for type {0}")]
    NotFoundForType(&'static str),

    /// The resolved value is not of the requested type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The slot held neither a value nor a factory to produce one.
    ///
    /// Happens when an earlier materialization of the same entry panicked.
    #[error("factory for {0} returned no value")]
    FactoryReturnedNothing(String),

    /// An invoked function asked for a parameter nobody registered.
    #[error("cannot resolve parameter {position} of type {type_name}")]
    MissingParameter {
        type_name: &'static str,
        position: usize,
    },

    /// An invoked function returned an error.
    #[error("invoked function failed: {0}")]
    Invocation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Empty registration name, rejected in strict mode.
    #[error("dependency name cannot be empty")]
    EmptyName,

    /// Dependency was already registered (when override is disabled).
    #[error("{}", .0)]
    AlreadyRegistered(AlreadyRegisteredError),
}

/// Error when a name or type key has no registration.
///
/// Includes similar keys that *are* registered.
#[derive(Debug)]
pub struct NotFoundError {
    /// The name or type that was requested
    pub requested: String,
    /// Registered keys that look alike (for "did you mean?" hints)
    pub suggestions: Vec<String>,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dependency '{}' not found", self.requested)?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        Ok(())
    }
}

/// Error when trying to register a key that already exists.
#[derive(Debug)]
pub struct AlreadyRegisteredError {
    pub key: String,
}

impl fmt::Display for AlreadyRegisteredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dependency already registered: {}", self.key)?;
        write!(
            f,
            "\n  Hint: enable allow_override in Settings to replace existing registrations"
        )
    }
}

/// Convenient Result type for container operations.
pub type Result<T> = std::result::Result<T, InjectorError>;

/// Turns a recoverable resolution failure into an unrecoverable one.
///
/// Meant for startup wiring, where a missing registration is a
/// programming error. The panic payload is the [`InjectorError`] itself,
/// so it can be recovered with `downcast` after `catch_unwind`.
pub trait OrAbort<T> {
    /// Returns the value, or logs the error and panics with it.
    fn or_abort(self) -> T;
}

impl<T> OrAbort<T> for Result<T> {
    #[track_caller]
    fn or_abort(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                error!(error = %err, "Unrecoverable dependency wiring failure");
                std::panic::panic_any(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn not_found_error_display() {
        let err = InjectorError::NotFound(NotFoundError {
            requested: "missing".into(),
            suggestions: vec![],
        });

        let msg = err.to_string();
        assert_eq!(msg, "dependency 'missing' not found");
    }

    #[test]
    fn not_found_error_lists_suggestions() {
        let err = InjectorError::NotFound(NotFoundError {
            requested: "databse".into(),
            suggestions: vec!["database".into()],
        });

        let msg = err.to_string();
        assert!(msg.contains("Did you mean"));
        assert!(msg.contains("- database"));
    }

    #[test]
    fn missing_parameter_display() {
        let err = InjectorError::MissingParameter {
            type_name: "app::Database",
            position: 1,
        };
        assert_eq!(
            err.to_string(),
            "cannot resolve parameter 1 of type app::Database"
        );
    }

    #[test]
    fn invocation_keeps_source() {
        use std::error::Error as _;

        let err = InjectorError::Invocation("boom".into());
        assert!(err.to_string().contains("boom"));
        assert!(err.source().is_some());
    }

    #[test]
    fn or_abort_passes_value_through() {
        let ok: Result<i32> = Ok(7);
        assert_eq!(ok.or_abort(), 7);
    }

    #[test]
    fn or_abort_panics_with_error_payload() {
        let failed: Result<i32> = Err(InjectorError::NoDependencyForTypeName("Database".into()));

        let payload = catch_unwind(AssertUnwindSafe(|| failed.or_abort())).unwrap_err();
        let err = payload.downcast::<InjectorError>().unwrap();
        assert!(matches!(*err, InjectorError::NoDependencyForTypeName(ref n) if n == "Database"));
    }
}
