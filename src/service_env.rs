//! Information about the service's runtime environment.

// Unfortunately, strum's `EnumIs` generates undocumented methods
#![allow(missing_docs)]

use std::env;
use std::sync::{OnceLock, RwLock};

use strum_macros::{AsRefStr, Display, EnumIs, EnumString};

/// Name of the environment variable controlling the [`ServiceEnv`].
pub const SERVICE_ENV_VAR: &str = "POKEMON_API_ENV";

/// Environment in which service is running.
///
/// This is controlled by the `POKEMON_API_ENV` environment variable (see [`current`](ServiceEnv::current)).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, AsRefStr, Display, EnumIs, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ServiceEnv {
    /// Service is running in a development environment.
    ///
    /// Error responses include the internal error chain.
    Development,

    /// Service is running in a production environment.
    ///
    /// Error responses only contain a generic message. This is the default.
    #[default]
    Production,
}

impl ServiceEnv {
    /// Returns the current service runtime environment.
    ///
    /// The value is read once from `POKEMON_API_ENV` (case-insensitive) and cached. Missing or
    /// unrecognized values yield [`Production`](ServiceEnv::Production).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use log::info;
    /// use pokemon_api::service_env::ServiceEnv;
    ///
    /// info!("Service is running in {}", ServiceEnv::current());
    ///
    /// if ServiceEnv::current().is_development() {
    ///     info!("Internal errors will be included in API responses");
    /// }
    /// ```
    pub fn current() -> Self {
        static CURRENT_ENV: OnceLock<ServiceEnv> = OnceLock::new();

        if cfg!(test) {
            if let Some(test_env) = *TEST_ENV.read().unwrap_or_else(|err| err.into_inner()) {
                return test_env;
            }
        }

        *CURRENT_ENV.get_or_init(ServiceEnv::reload)
    }

    /// Returns the current runtime environment, reloading it.
    ///
    /// Only tests should need this; regular code should use [`current`](ServiceEnv::current).
    pub fn reload() -> Self {
        env::var(SERVICE_ENV_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Awaits `f` while [`ServiceEnv::current`] is forced to return `env`.
    #[cfg(test)]
    pub async fn test<F>(env: ServiceEnv, f: F)
    where
        F: std::future::Future<Output = ()>,
    {
        let prev_test_env = TEST_ENV.write().unwrap().replace(env);

        f.await;

        *TEST_ENV.write().unwrap() = prev_test_env;
    }
}

/// Environment forced by [`ServiceEnv::test`].
static TEST_ENV: RwLock<Option<ServiceEnv>> = RwLock::new(None);
