//! Core container implementation for Wirebox DI.

pub mod container;
pub mod error;
pub mod invoke;
pub mod key;
pub mod provider;
mod registry;
pub mod settings;
pub mod typed;

pub use container::{Container, ContainerBuilder, prelude};
pub use error::{InjectorError, OrAbort, Result};
pub use key::DependencyKey;
pub use provider::{Instance, Provider};
pub use settings::Settings;
