//! Runs the Pokemon API database migrations.
//!
//! Similar to running `diesel migration run`, but without the need to install the diesel CLI.
//! The migrations matching the configured backend are applied; nothing is done for the
//! in-memory backend.

use std::sync::OnceLock;
use std::time::Instant;

use anyhow::{anyhow, Context};
use diesel::migration::MigrationSource;
use diesel::Connection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::{AsyncMysqlConnection, AsyncPgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{info, trace};
use pokemon_api::db::{get_backend, get_db_url, Backend};
use pokemon_api::helpers::env::load_optional_dotenv;
use regex::Regex;
use simple_logger::SimpleLogger;

/// PostgreSQL migrations, embedded in our executable.
pub const POSTGRES_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/postgres");

/// MySQL migrations, embedded in our executable.
pub const MYSQL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/mysql");

/// Main program body.
///
/// Reads migrations and applies them to the Pokemon database as required.
fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .init()
        .with_context(|| "failed to initialize logging facility")?;

    info!("Loading environment variables");
    load_optional_dotenv()
        .with_context(|| "failed to load `.env` file containing environment variables")?;

    info!("Starting Pokemon API migration run");
    let start_time = Instant::now();

    let backend = get_backend().with_context(|| "failed to determine store backend")?;
    match backend {
        Backend::Postgres => apply_migrations::<AsyncConnectionWrapper<AsyncPgConnection>, _>(
            &get_db_url(backend)?,
            POSTGRES_MIGRATIONS,
        )?,
        Backend::Mysql => apply_migrations::<AsyncConnectionWrapper<AsyncMysqlConnection>, _>(
            &get_db_url(backend)?,
            MYSQL_MIGRATIONS,
        )?,
        Backend::Memory => {
            info!("The {} backend has no schema; nothing to migrate", backend);
            return Ok(());
        },
    }

    let elapsed = start_time.elapsed();
    info!("Migrations applied in {:.4?}s.", elapsed.as_secs_f64());

    Ok(())
}

/// Filters the user/password from a DB URL so we can log it.
fn filter_db_url(db_url: &str) -> anyhow::Result<String> {
    static FILTER: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

    let filter = FILTER
        .get_or_init(|| {
            Regex::new(concat!(
                "(?<scheme>postgres|postgresql|mysql)://",
                "(?:[^:@]+(?::[^@]+)?@)?",
                "(?<host>[^:/]+)(?<port>:\\d+)?/(?<db>\\w+)",
            ))
        })
        .as_ref()
        .map_err(|err| err.clone())
        .with_context(|| "failed to compile DB URL filter")?;
    Ok(filter
        .replace_all(db_url, "$scheme://$host$port/$db")
        .into_owned())
}

/// Applies DB migrations to the given database, using connection type `C`.
fn apply_migrations<C, S>(db_url: &str, migrations: S) -> anyhow::Result<()>
where
    C: Connection + MigrationHarness<C::Backend>,
    S: MigrationSource<C::Backend>,
{
    info!("Connecting to database `{}`", filter_db_url(db_url)?);
    let mut connection = C::establish(db_url).with_context(|| "failed to connect to database")?;

    info!("Applying migrations");
    let applied_migrations = connection
        .run_pending_migrations(migrations)
        .map_err(|err| anyhow!("{}", err))
        .with_context(|| "failed to apply migrations")?;
    trace!("{} migrations applied", applied_migrations.len());

    Ok(())
}
