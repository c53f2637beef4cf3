//! # Wirebox: a small dependency injection container
//!
//! Register instances or lazy factories by name or by type, resolve them
//! on demand, and let the container call functions with their parameters
//! filled in.
//!
//! ```rust
//! use std::sync::Arc;
//! use wirebox::prelude::*;
//!
//! struct Database {
//!     name: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! let mut container = Container::new();
//! container.register_type(Provider::factory(|| Database { name: "db".into() }))?;
//! container.register_type(Provider::factory_with(|c: &Container| UserService {
//!     db: c.must_resolve_type(),
//! }))?;
//!
//! container.invoke(|users: Arc<UserService>| {
//!     assert_eq!(users.db.name, "db");
//! })?;
//! # Ok::<(), wirebox::InjectorError>(())
//! ```

pub use wirebox_container::*;
pub use wirebox_support::*;
