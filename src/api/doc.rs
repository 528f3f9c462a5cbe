//! OpenAPI documentation support.

use actix_web::web::ServiceConfig;
use log::trace;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api::errors::ErrorResponse;
use crate::models::message::{Confirmation, Created};
use crate::models::pokemon::{CreatePokemon, PatchPokemon, Pokemon};

/// Path where the OpenAPI document is served, in JSON format.
pub const OPENAPI_PATH: &str = "/api-spec";

/// Registers the various OpenAPI-related endpoints: the raw document and its viewers
/// (Swagger UI, RapiDoc and Redoc).
///
/// Called automatically from [`configure_api`](crate::configure_api).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding OpenAPI doc endpoints");

    let openapi = ApiDoc::openapi();

    config
        .service(SwaggerUi::new("/api-doc/{_:.*}").url(OPENAPI_PATH, openapi.clone()))
        .service(RapiDoc::new(OPENAPI_PATH).path("/api-rapidoc"))
        .service(Redoc::with_url("/api-redoc", openapi));
}

/// API documentation in OpenAPI format.
///
/// Generated automatically by the [`utoipa`] crate. To use, simply call [`ApiDoc::openapi`]
/// to create an instance, then pass it to the various helpers that allow the API doc to be
/// published, like [`SwaggerUi`].
#[derive(OpenApi)]
#[openapi(
    info(title = "Pokemon API"),
    paths(
        api::pokemon::list,
        api::pokemon::get_by_id,
        api::pokemon::get_by_name,
        api::pokemon::create,
        api::pokemon::update_by_id,
        api::pokemon::update_by_name,
        api::pokemon::delete_by_id,
        api::pokemon::delete_by_name,
    ),
    components(
        schemas(Pokemon, CreatePokemon, PatchPokemon, Created, Confirmation, ErrorResponse),
        responses(Pokemon, ErrorResponse),
    ),
    tags((name = "pokemon", description = "Pokemon management endpoints")),
)]
pub struct ApiDoc;
