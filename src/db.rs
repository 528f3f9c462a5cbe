//! Helpers to connect to the Pokemon store. Supports PostgreSQL and MySQL, as well as an
//! in-memory store that needs no database.

use std::sync::Arc;
use std::time::Duration;

use deadpool::managed::{Manager, PoolBuilder};
use deadpool::Runtime;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::EnvVarContext;
use crate::helpers::env::{
    env_var_or, optional_enum_env_var, optional_env_var, optional_int_env_var,
};
use crate::store::memory::MemoryStore;
use crate::store::mysql::{self, MysqlStore};
use crate::store::postgres::{self, PostgresStore};
use crate::store::PokemonStore;

/// Default value for the `DB_HOST` environment variable.
pub const DEFAULT_DB_HOST: &str = "localhost";

/// Default value for the `DB_USER` environment variable.
pub const DEFAULT_DB_USER: &str = "root";

/// Default value for the `DB_NAME` environment variable.
pub const DEFAULT_DB_NAME: &str = "pokemondb";

/// Default value for the `DB_CONNECT_TIMEOUT` environment variable, in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Kind of backend used to store Pokemon.
#[derive(Debug, Copy, Clone, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Backend {
    /// PostgreSQL database, accessed through [`PostgresStore`].
    Postgres,

    /// MySQL (or MariaDB) database, accessed through [`MysqlStore`].
    Mysql,

    /// Records kept in process memory, through [`MemoryStore`].
    Memory,
}

impl Backend {
    /// Detects the backend from the scheme of a connection URL.
    ///
    /// Returns `None` if the scheme is not recognized.
    pub fn from_url(url: &str) -> Option<Self> {
        let (scheme, _) = url.split_once(':')?;
        match scheme {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "mysql" => Some(Self::Mysql),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }

    /// Returns the port the backend listens on by default, if it uses a network connection.
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Postgres => Some(5432),
            Self::Mysql => Some(3306),
            Self::Memory => None,
        }
    }
}

/// Returns the [`Backend`] to use to store Pokemon.
///
/// The backend can be set explicitly through the `POKEMON_API_DB_BACKEND` environment
/// variable (`postgres`, `mysql` or `memory`). Otherwise, it is detected from the scheme of
/// `DATABASE_URL`, if set. If neither is available, [`Mysql`](Backend::Mysql) is used.
pub fn get_backend() -> crate::Result<Backend> {
    if let Some(backend) = optional_enum_env_var("POKEMON_API_DB_BACKEND")
        .with_env_var_context(|| "failed to parse environment variable POKEMON_API_DB_BACKEND")?
    {
        return Ok(backend);
    }

    Ok(optional_env_var("DATABASE_URL")
        .with_env_var_context(|| "failed to parse environment variable DATABASE_URL")?
        .and_then(|url| Backend::from_url(&url))
        .unwrap_or(Backend::Mysql))
}

/// Returns the database connection URL for the given [`Backend`].
///
/// If the `DATABASE_URL` environment variable is set, it is used as-is. Otherwise, the URL is
/// built from the following environment variables:
///
/// | Variable      | Default                          |
/// |---------------|----------------------------------|
/// | `DB_HOST`     | `localhost`                      |
/// | `DB_PORT`     | default port of the backend      |
/// | `DB_USER`     | `root`                           |
/// | `DB_PASSWORD` | empty (no password)              |
/// | `DB_NAME`     | `pokemondb`                      |
///
/// User and password are inserted verbatim; use `DATABASE_URL` if they contain characters that
/// need to be percent-encoded.
pub fn get_db_url(backend: Backend) -> crate::Result<String> {
    if let Some(url) = optional_env_var("DATABASE_URL")
        .with_env_var_context(|| "failed to parse environment variable DATABASE_URL")?
    {
        return Ok(url);
    }

    let host = env_var_or("DB_HOST", DEFAULT_DB_HOST)
        .with_env_var_context(|| "failed to parse environment variable DB_HOST")?;
    let user = env_var_or("DB_USER", DEFAULT_DB_USER)
        .with_env_var_context(|| "failed to parse environment variable DB_USER")?;
    let password = env_var_or("DB_PASSWORD", "")
        .with_env_var_context(|| "failed to parse environment variable DB_PASSWORD")?;
    let db_name = env_var_or("DB_NAME", DEFAULT_DB_NAME)
        .with_env_var_context(|| "failed to parse environment variable DB_NAME")?;
    let port = optional_int_env_var::<u16>("DB_PORT")
        .with_env_var_context(|| "failed to parse environment variable DB_PORT")?
        .or(backend.default_port());

    let credentials = match password.as_str() {
        "" => user,
        password => format!("{}:{}", user, password),
    };
    let address = match port {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    };

    Ok(format!("{}://{}@{}/{}", backend, credentials, address, db_name))
}

/// Returns the maximum number of connections to keep in a database connection pool.
///
/// This can be specified through the `MAX_POOL_SIZE` environment variable, but is optional.
/// If not specified, the default value depends on the number of physical CPUs on the machine
/// (see [`PoolConfig::default`](deadpool::managed::PoolConfig::default)).
pub fn get_max_pool_size() -> crate::Result<Option<usize>> {
    optional_int_env_var("MAX_POOL_SIZE")
        .with_env_var_context(|| "failed to parse environment variable MAX_POOL_SIZE")
}

/// Returns the maximum time to wait when establishing a new database connection.
///
/// This can be specified in seconds through the `DB_CONNECT_TIMEOUT` environment variable;
/// it defaults to 10 seconds.
pub fn get_connect_timeout() -> crate::Result<Duration> {
    let secs = optional_int_env_var("DB_CONNECT_TIMEOUT")
        .with_env_var_context(|| "failed to parse environment variable DB_CONNECT_TIMEOUT")?;

    Ok(Duration::from_secs(secs.unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS)))
}

/// Finishes configuring a connection pool and builds it.
///
/// Applies the settings from [`get_max_pool_size`] and [`get_connect_timeout`]. Connections are
/// only established when they are first needed, so this does not fail if the database is down.
pub fn build_pool<M>(
    mut pool_builder: PoolBuilder<M>,
) -> crate::Result<deadpool::managed::Pool<M>>
where
    M: Manager,
{
    if let Some(max_size) = get_max_pool_size()? {
        pool_builder = pool_builder.max_size(max_size);
    }

    Ok(pool_builder
        .runtime(Runtime::Tokio1)
        .create_timeout(Some(get_connect_timeout()?))
        .build()?)
}

/// Creates the [`PokemonStore`] for the current configuration.
///
/// The [`Backend`] is determined by [`get_backend`]. For SQL backends, a connection pool is
/// created using [`get_db_url`] and [`build_pool`]. The returned store should be
/// [closed](PokemonStore::close) when the application shuts down.
pub fn open_store() -> crate::Result<Arc<dyn PokemonStore>> {
    let backend = get_backend()?;

    let store: Arc<dyn PokemonStore> = match backend {
        Backend::Postgres => {
            let manager = AsyncDieselConnectionManager::new(get_db_url(backend)?);
            Arc::new(PostgresStore::new(build_pool(postgres::Pool::builder(manager))?))
        },
        Backend::Mysql => {
            let manager = AsyncDieselConnectionManager::new(get_db_url(backend)?);
            Arc::new(MysqlStore::new(build_pool(mysql::Pool::builder(manager))?))
        },
        Backend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}
