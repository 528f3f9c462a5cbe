//! Library crate for the Pokemon REST API.
//!
//! Contains the actual implementation of the API endpoints, the [`PokemonStore`] abstraction and
//! its backends, and the helpers used by the binaries (`pokemon_api`, `run_migrations` and
//! `seed_db`). For more information, see `README.md`.

#![cfg_attr(backtrace_support, feature(error_generic_member_access))]

pub mod api;
pub mod db;
pub mod error;
pub mod helpers;
pub mod models;
pub mod schema;
pub mod service_env;
pub mod services;
pub mod store;

use std::sync::Arc;

use actix_web::web;
use actix_web::web::{JsonConfig, PathConfig, ServiceConfig};
pub use error::Error;
pub use error::Result;
use log::trace;

use crate::api::errors::{actix_error_handler, route_not_found};
use crate::store::PokemonStore;

/// Creates an [`App`](actix_web::App) serving the Pokemon API over the given [`PokemonStore`].
///
/// The store expression must evaluate to an `Arc<dyn PokemonStore>`. Since the app factory of an
/// [`HttpServer`](actix_web::HttpServer) runs once per worker, pass a clone of the store.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use actix_web::HttpServer;
/// use pokemon_api::pokemon_api_app;
/// use pokemon_api::store::memory::MemoryStore;
/// use pokemon_api::store::PokemonStore;
///
/// # async fn run() -> std::io::Result<()> {
/// let store: Arc<dyn PokemonStore> = Arc::new(MemoryStore::new());
/// HttpServer::new(move || pokemon_api_app!(Arc::clone(&store)))
///     .bind(("127.0.0.1", 3002))?
///     .run()
///     .await
/// # }
/// ```
#[macro_export]
macro_rules! pokemon_api_app {
    ($store:expr) => {{
        let store: std::sync::Arc<dyn $crate::store::PokemonStore> = $store;
        actix_web::App::new()
            .wrap($crate::api::cors())
            .wrap(actix_web::middleware::Logger::default())
            .configure($crate::configure_api(&store))
    }};
}

/// Registers the Pokemon API endpoints and the OpenAPI documentation endpoints.
///
/// Also configures the JSON body and path extractors so that their errors produce the same
/// responses as errors returned by the endpoints. Requests matching no endpoint get a JSON
/// `404 Not Found`.
pub fn configure_api(store: &Arc<dyn PokemonStore>) -> impl FnOnce(&mut ServiceConfig) + '_ {
    |config| {
        trace!("Configuring extractor error handlers");
        config
            .app_data(JsonConfig::default().error_handler(actix_error_handler))
            .app_data(PathConfig::default().error_handler(actix_error_handler))
            .configure(api::configure(store))
            .configure(api::doc::configure)
            .default_service(web::to(route_not_found));
    }
}
