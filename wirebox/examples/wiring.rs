//! Wiring a small application with Wirebox.
//!
//! Run with `RUST_LOG=wirebox_container=debug` to watch registrations
//! and factory materialization.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wirebox::prelude::*;

trait Logger: Send + Sync {
    fn log(&self, msg: &str);
}

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, msg: &str) {
        println!("[LOG] {msg}");
    }
}

struct Config {
    database_url: String,
}

struct Database {
    url: String,
    logger: Arc<Box<dyn Logger>>,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        self.logger.log(&format!("Executing: {sql}"));
        format!("Results from {}", self.url)
    }
}

struct UserService {
    db: Arc<Database>,
}

impl UserService {
    fn find_user(&self, id: u64) -> String {
        self.db.query(&format!("SELECT * FROM users WHERE id = {id}"))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wirebox_container=debug")),
        )
        .init();

    let mut container = Container::builder()
        // config lives under a name, the way an application keeps settings
        .register(
            "config",
            Provider::instance(Config {
                database_url: "postgres://localhost/myapp".to_string(),
            }),
        )
        .register_type(Provider::instance(Box::new(ConsoleLogger) as Box<dyn Logger>))
        .register_type(Provider::factory_with(|c: &Container| {
            let config: Arc<Config> = c.resolve_named("config").or_abort();
            Database {
                url: config.database_url.clone(),
                logger: c.must_resolve_type(),
            }
        }))
        .build()?;

    container.register_type(Provider::factory_with(|c: &Container| UserService {
        db: c.must_resolve_type(),
    }))?;

    info!(?container, "Container ready");

    container.invoke(|users: Arc<UserService>| {
        println!("{}", users.find_user(42));
    })?;

    // "UserService" resolves textually too
    let users = container.resolve_by_type_name("UserService")?;
    info!(same = users.is::<UserService>(), "Resolved by bare name");

    Ok(())
}
