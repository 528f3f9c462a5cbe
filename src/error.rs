//! [`Error`] type definition for our app.

use std::env;
use std::ffi::OsString;
use std::num::ParseIntError;

use actix_web::error::{JsonPayloadError, PathError};
use diesel_async::pooled_connection::deadpool::PoolError;
use strum_macros::{AsRefStr, Display};
use validator::ValidationErrors;

use crate::forward_from;

/// [`Result`](core::result::Result) type for our crate.
///
/// Uses our crate's [`Error`] type automatically.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type used throughout this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error that occurred when loading data from an environment variable.
    #[error("error related to environment variable: {context}")]
    EnvVar {
        /// Environment variable error context.
        ///
        /// Used by the code (via [`EnvVarContext::with_env_var_context`]) to provide context for the error.
        context: String,

        /// Source of the environment error.
        source: EnvVarError,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Error caused by invalid user input.
    #[error("input error")]
    Input {
        /// Source of the input error.
        #[from]
        source: InputError,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Error related to the database connection pool.
    ///
    /// See [`PoolError`](deadpool::managed::PoolError) (and the inner [`diesel_async::pooled_connection::PoolError`])
    /// for more information.
    #[error("database connection error")]
    Pool {
        /// Source of the pool error.
        #[from]
        source: PoolError,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Error that occurred while performing a query against the Pokemon store.
    ///
    /// Store adapters report their failures using [`diesel`]'s error type, even when they do
    /// not talk to a database (see [`MemoryStore`](crate::store::memory::MemoryStore)).
    #[error("{operation} query error: {context}")]
    Query {
        /// Kind of operation that was attempted.
        operation: Operation,

        /// Query error context.
        ///
        /// Used by the code (via [`QueryContext::with_query_context`]) to provide some context
        /// as to the type of query that caused the error.
        context: String,

        /// Source of the query error.
        source: diesel::result::Error,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },
}

/// Error type used for errors related to environment variables.
///
/// This is our variant of [`VarError`], with additional variants for our specific use cases.
/// In particular, a [`From`] `impl` is provided to be able to convert a [`VarError`] to this type.
///
/// [`VarError`]: env::VarError
#[derive(Debug, thiserror::Error)]
pub enum EnvVarError {
    /// The environment variable did not exist.
    ///
    /// This is our equivalent for [`VarError::NotPresent`](env::VarError::NotPresent).
    #[error("variable not found in environment")]
    NotFound,

    /// The environment variable could not be parsed to a Rust string because it contains
    /// invalid Unicode characters.
    ///
    /// This is our equivalent for [`VarError::NotUnicode`](env::VarError::NotUnicode).
    #[error("variable contained invalid, non-Unicode characters")]
    NotUnicode(OsString),

    /// The environment variable was expected to contain an int value, but didn't.
    #[error("expected int value, found {value}")]
    IntExpected {
        /// The actual value found in the environment variable.
        value: String,

        /// The parsing error that occurred when we tried to parse the value as an int.
        source: ParseIntError,
    },

    /// The environment variable contained a value that is not among the supported ones.
    #[error("unsupported value {value}")]
    Unsupported {
        /// The actual value found in the environment variable.
        value: String,

        /// The parsing error that occurred when we tried to match the value.
        source: strum::ParseError,
    },
}

impl From<env::VarError> for EnvVarError {
    /// Converts an `std` [`VarError`] to our intermediate [`EnvVarError`] type.
    ///
    /// Each variant of [`VarError`] has a corresponding variant in our [`EnvVarError`] type,
    /// so the mapping is straightforward.
    ///
    /// [`VarError`]: env::VarError
    fn from(value: env::VarError) -> Self {
        match value {
            env::VarError::NotPresent => Self::NotFound,
            env::VarError::NotUnicode(os_str) => Self::NotUnicode(os_str),
        }
    }
}

/// Error type wrapping the different ways a request's input can be rejected.
///
/// Errors produced by `actix-web` extractors (see [`actix_error_handler`](crate::api::errors::actix_error_handler))
/// and by [`validator`] all end up in an [`Input`](Error::Input) error.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The request body could not be parsed as the expected JSON payload.
    #[error(transparent)]
    Json(#[from] JsonPayloadError),

    /// A path parameter could not be parsed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The request was well-formed, but its content failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

forward_from!(JsonPayloadError => InputError => Error);
forward_from!(PathError => InputError => Error);
forward_from!(ValidationErrors => InputError => Error);

/// Kind of operation performed on the Pokemon store.
///
/// Attached to [`Query`](Error::Query) errors so that API responses can describe what failed
/// without revealing the underlying cause.
#[derive(Debug, Copy, Clone, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    /// Listing every Pokemon.
    List,

    /// Fetching a single Pokemon.
    Fetch,

    /// Creating a Pokemon.
    Create,

    /// Updating some fields of a Pokemon.
    Update,

    /// Deleting a Pokemon.
    Delete,
}

impl Operation {
    /// Returns a generic message describing the failure of this operation.
    ///
    /// This message is safe to return to API callers.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to fetch Pokemon list.",
            Self::Fetch => "Failed to fetch Pokemon.",
            Self::Create => "Failed to create Pokemon.",
            Self::Update => "Failed to update Pokemon.",
            Self::Delete => "Failed to delete Pokemon.",
        }
    }
}

/// Helper trait to provide context for [`EnvVar`](Error::EnvVar) errors.
pub trait EnvVarContext {
    /// Type of output returned by [`with_env_var_context`](EnvVarContext::with_env_var_context).
    type Output;

    /// Provides context about the error that occurred.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::env;
    ///
    /// use pokemon_api::error::EnvVarContext;
    ///
    /// # fn example() -> pokemon_api::Result<()> {
    /// let db_url = env::var("DATABASE_URL")
    ///     .with_env_var_context(|| "DATABASE_URL environment variable should be set")?;
    /// #
    /// # Ok(())
    /// # }
    /// ```
    fn with_env_var_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<E> EnvVarContext for E
where
    E: Into<EnvVarError>,
{
    type Output = Error;

    fn with_env_var_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        Error::EnvVar {
            context: (context)().into(),
            source: self.into(),
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl<T, E> EnvVarContext for core::result::Result<T, E>
where
    E: EnvVarContext<Output = Error>,
{
    type Output = Result<T>;

    fn with_env_var_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.with_env_var_context(context))
    }
}

forward_from!(diesel_async::pooled_connection::PoolError => PoolError => Error);

impl From<deadpool::managed::BuildError> for Error {
    /// Converts a [`BuildError`](deadpool::managed::BuildError) into our [`Error`] type.
    ///
    /// This makes it possible to use `?` when building a connection pool. The only possible
    /// build error is a missing runtime, which is a programming error since we always
    /// specify one (see [`db::build_pool`](crate::db::build_pool)).
    fn from(value: deadpool::managed::BuildError) -> Self {
        match value {
            deadpool::managed::BuildError::NoRuntimeSpecified => {
                panic!("Runtime should be specified when building pool: {}", value);
            },
        }
    }
}

/// Helper trait to provide context for [`Query`](Error::Query) errors.
pub trait QueryContext {
    /// Type of output returned by [`with_query_context`](QueryContext::with_query_context).
    type Output;

    /// Provides context about the query performed when the error occurred.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use diesel::QueryDsl;
    /// use diesel_async::RunQueryDsl;
    /// use pokemon_api::error::{Operation, QueryContext};
    /// use pokemon_api::models::pokemon::Pokemon;
    /// use pokemon_api::schema::pokemon::dsl::*;
    ///
    /// # async fn example(
    /// #     connection: &mut diesel_async::AsyncPgConnection,
    /// #     pokemon_id: i64,
    /// # ) -> pokemon_api::Result<()> {
    /// let found: Pokemon = pokemon
    ///     .find(pokemon_id)
    ///     .first(connection)
    ///     .await
    ///     .with_query_context(Operation::Fetch, || {
    ///         format!("failed to fetch pokemon with id {}", pokemon_id)
    ///     })?;
    /// #
    /// # Ok(())
    /// # }
    /// ```
    fn with_query_context<C, F>(self, operation: Operation, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl QueryContext for diesel::result::Error {
    type Output = Error;

    fn with_query_context<C, F>(self, operation: Operation, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        Error::Query {
            operation,
            context: (context)().into(),
            source: self,
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl<T, E> QueryContext for core::result::Result<T, E>
where
    E: QueryContext<Output = Error>,
{
    type Output = Result<T>;

    fn with_query_context<C, F>(self, operation: Operation, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.with_query_context(operation, context))
    }
}
