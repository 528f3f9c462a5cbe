//! Types and functions used to implement the Pokemon REST API.

pub mod doc;
pub mod errors;
pub mod pokemon;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web;
use actix_web::web::ServiceConfig;
use log::trace;

use crate::store::PokemonStore;

/// Allows registration of the Pokemon API endpoints under the `/pokemon` scope.
///
/// Called automatically from [`configure_api`](crate::configure_api).
pub fn configure(store: &Arc<dyn PokemonStore>) -> impl FnOnce(&mut ServiceConfig) + '_ {
    |config| {
        trace!("Adding API endpoints for /pokemon");
        config.service(web::scope("/pokemon").configure(pokemon::configure(store)));
    }
}

/// Returns the CORS policy applied to the whole app.
///
/// Requests are accepted from any origin, for the methods and headers used by the API.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
