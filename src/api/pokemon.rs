//! Implementation of the Pokemon REST API endpoints.
//!
//! # Endpoints
//!
//! | HTTP method | Endpoint                 | Usage                                      | See                  |
//! |-------------|--------------------------|--------------------------------------------|----------------------|
//! | `GET`       | `/pokemon`               | Lists all Pokemon                          | [`list`]             |
//! | `GET`       | `/pokemon/{id}`          | Returns one Pokemon, using its id          | [`get_by_id`]        |
//! | `GET`       | `/pokemon/nombre/{name}` | Returns one Pokemon, using its name        | [`get_by_name`]      |
//! | `POST`      | `/pokemon`               | Adds a new Pokemon                         | [`create`]           |
//! | `PATCH`     | `/pokemon/{id}`          | Updates some fields of a Pokemon, by id    | [`update_by_id`]     |
//! | `PATCH`     | `/pokemon/nombre/{name}` | Updates some fields of a Pokemon, by name  | [`update_by_name`]   |
//! | `DELETE`    | `/pokemon/{id}`          | Deletes a Pokemon, using its id            | [`delete_by_id`]     |
//! | `DELETE`    | `/pokemon/nombre/{name}` | Deletes a Pokemon, using its name          | [`delete_by_name`]   |

pub mod doc;

use std::sync::Arc;

use actix_web::web::{Data, Json, Path, ServiceConfig};
use actix_web::{delete, get, patch, post, HttpResponse};
use log::trace;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

use crate::api::pokemon::doc::{
    InvalidIdParamOrPokemonBodyResponse, InvalidIdParamResponse, InvalidPatchBodyResponse,
    InvalidPokemonBodyResponse, NameConflictResponse, NotFoundResponse, ServerErrorResponse,
};
use crate::models::message::{Confirmation, Created};
use crate::models::pokemon::{CreatePokemon, PatchPokemon, Pokemon};
use crate::services::pokemon::{self, PokemonRef};
use crate::store::PokemonStore;

/// Allows registration of all Pokemon REST API endpoints.
///
/// See [module documentation](self) for the entire list of supported endpoints.
/// Called automatically from [`api::configure`](crate::api::configure).
pub fn configure(store: &Arc<dyn PokemonStore>) -> impl FnOnce(&mut ServiceConfig) + '_ {
    |config| {
        trace!("Registering Pokemon service app data");
        config.app_data(Data::new(pokemon::Service::new(Arc::clone(store))));

        trace!("Adding API CRUD endpoints for /pokemon");
        config
            .service(list)
            .service(get_by_name)
            .service(get_by_id)
            .service(create)
            .service(update_by_name)
            .service(update_by_id)
            .service(delete_by_name)
            .service(delete_by_id);
    }
}

/// [`Result`](crate::Result) definition used to return [`HttpResponse`]s from API endpoints.
///
/// If an [`Error`](crate::Error) is returned, it is converted to an appropriate [`HttpResponse`]
/// by the error handling code (see [`ErrorResponse::from`](crate::api::errors::ErrorResponse::from) for details).
pub type HttpResult = crate::Result<HttpResponse>;

/// Path parameter used for endpoints with a Pokemon id.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct Id {
    /// Id of the Pokemon
    #[validate(range(min = 0))]
    #[param(minimum = 0)]
    pub id: i64,
}

impl Id {
    /// Validates the id and returns it as a [`PokemonRef`].
    pub fn validated(self) -> crate::Result<PokemonRef<'static>> {
        self.validate()?;

        Ok(PokemonRef::Id(self.id))
    }
}

/// Path parameter used for endpoints with a Pokemon name.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct Name {
    /// Name of the Pokemon
    #[param(example = "Pikachu")]
    pub name: String,
}

impl Name {
    /// Returns this name as a [`PokemonRef`].
    pub fn pokemon_ref(&self) -> PokemonRef<'_> {
        PokemonRef::Name(&self.name)
    }
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to list all Pokemon.

        Registered as `GET /pokemon`.

        # Output

        A list of [`Pokemon`]s ordered by id, serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Lists all Pokemon")]
#[utoipa::path(
    context_path = "/pokemon",
    tag = "pokemon",
    responses(
        (status = OK, description = "List of all Pokemon", body = Vec<Pokemon>),
        ServerErrorResponse,
    ),
)]
#[get("", name = "pokemon_list")]
pub async fn list(service: Data<pokemon::Service>) -> HttpResult {
    let pokemon = service.get_ref().get_pokemons().await?;

    Ok(HttpResponse::Ok().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to fetch one Pokemon using its id.

        Registered as `GET /pokemon/{id}`.

        # Input

        - `{id}`: id of Pokemon to fetch; must be a non-negative integer.

        # Output

        A [`Pokemon`], serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Returns information about a Pokemon, using its id")]
#[utoipa::path(
    context_path = "/pokemon",
    tag = "pokemon",
    params(Id),
    responses(
        (status = OK, response = Pokemon),
        InvalidIdParamResponse,
        NotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[get("/{id}", name = "pokemon_by_id")]
pub async fn get_by_id(id: Path<Id>, service: Data<pokemon::Service>) -> HttpResult {
    let pokemon = service.get_ref().get_pokemon(id.into_inner().validated()?).await?;

    Ok(HttpResponse::Ok().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to fetch one Pokemon using its name.

        Registered as `GET /pokemon/nombre/{name}`.

        # Input

        - `{name}`: exact name of Pokemon to fetch.

        # Output

        A [`Pokemon`], serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Returns information about a Pokemon, using its name")]
#[utoipa::path(
    context_path = "/pokemon",
    tag = "pokemon",
    params(Name),
    responses(
        (status = OK, response = Pokemon),
        NotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[get("/nombre/{name}", name = "pokemon_by_name")]
pub async fn get_by_name(name: Path<Name>, service: Data<pokemon::Service>) -> HttpResult {
    let pokemon = service.get_ref().get_pokemon(name.pokemon_ref()).await?;

    Ok(HttpResponse::Ok().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to add a new Pokemon.

        Registered as `POST /pokemon`.

        # Input

        - Request body: the Pokemon data, as a JSON-serialized [`CreatePokemon`]. All fields are
                        required and must not be empty.

        # Output

        A [`Created`] message containing the id of the new Pokemon, serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Creates a new Pokemon")]
#[utoipa::path(
    context_path = "/pokemon",
    tag = "pokemon",
    request_body(
        content = inline(CreatePokemon),
        description = "New Pokemon information",
    ),
    responses(
        (status = CREATED, description = "Pokemon created", body = Created),
        InvalidPokemonBodyResponse,
        NameConflictResponse,
        ServerErrorResponse,
    ),
)]
#[post("", name = "pokemon_create")]
pub async fn create(
    new_pokemon: Json<CreatePokemon>,
    service: Data<pokemon::Service>,
) -> HttpResult {
    let new_id = service.get_ref().create_pokemon(&new_pokemon).await?;

    Ok(HttpResponse::Created().json(Created::new(new_id)))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to update some fields of a Pokemon, using its id.

        Any field not specified will not be updated. Registered as `PATCH /pokemon/{id}`.

        # Input

        - `{id}`: id of Pokemon to update.
        - Request body: the fields to update, as a JSON-serialized [`PatchPokemon`]. At least one
                        field must be specified; unknown fields are ignored.

        # Output

        A [`Confirmation`] message, serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Updates specific fields of a Pokemon, using its id")]
#[utoipa::path(
    context_path = "/pokemon",
    tag = "pokemon",
    params(Id),
    request_body(
        content = inline(PatchPokemon),
        description = "Specific Pokemon fields to update",
    ),
    responses(
        (status = OK, description = "Pokemon updated", body = Confirmation),
        InvalidIdParamOrPokemonBodyResponse,
        NotFoundResponse,
        NameConflictResponse,
        ServerErrorResponse,
    ),
)]
#[patch("/{id}", name = "pokemon_update_by_id")]
pub async fn update_by_id(
    id: Path<Id>,
    pokemon_patch: Json<PatchPokemon>,
    service: Data<pokemon::Service>,
) -> HttpResult {
    service
        .get_ref()
        .update_pokemon(id.into_inner().validated()?, &pokemon_patch)
        .await?;

    Ok(HttpResponse::Ok().json(Confirmation::new(Confirmation::UPDATED)))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to update some fields of a Pokemon, using its name.

        Any field not specified will not be updated. Registered as `PATCH /pokemon/nombre/{name}`.

        # Input

        - `{name}`: exact name of Pokemon to update.
        - Request body: the fields to update, as a JSON-serialized [`PatchPokemon`].

        # Output

        A [`Confirmation`] message, serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Updates specific fields of a Pokemon, using its name")]
#[utoipa::path(
    context_path = "/pokemon",
    tag = "pokemon",
    params(Name),
    request_body(
        content = inline(PatchPokemon),
        description = "Specific Pokemon fields to update",
    ),
    responses(
        (status = OK, description = "Pokemon updated", body = Confirmation),
        InvalidPatchBodyResponse,
        NotFoundResponse,
        NameConflictResponse,
        ServerErrorResponse,
    ),
)]
#[patch("/nombre/{name}", name = "pokemon_update_by_name")]
pub async fn update_by_name(
    name: Path<Name>,
    pokemon_patch: Json<PatchPokemon>,
    service: Data<pokemon::Service>,
) -> HttpResult {
    service
        .get_ref()
        .update_pokemon(name.pokemon_ref(), &pokemon_patch)
        .await?;

    Ok(HttpResponse::Ok().json(Confirmation::new(Confirmation::UPDATED)))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to delete a Pokemon, using its id.

        Registered as `DELETE /pokemon/{id}`.

        # Input

        - `{id}`: id of Pokemon to delete.

        # Output

        A [`Confirmation`] message, serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Deletes a Pokemon, using its id")]
#[utoipa::path(
    context_path = "/pokemon",
    tag = "pokemon",
    params(Id),
    responses(
        (status = OK, description = "Pokemon deleted", body = Confirmation),
        InvalidIdParamResponse,
        NotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[delete("/{id}", name = "pokemon_delete_by_id")]
pub async fn delete_by_id(id: Path<Id>, service: Data<pokemon::Service>) -> HttpResult {
    service
        .get_ref()
        .delete_pokemon(id.into_inner().validated()?)
        .await?;

    Ok(HttpResponse::Ok().json(Confirmation::new(Confirmation::DELETED)))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to delete a Pokemon, using its name.

        Registered as `DELETE /pokemon/nombre/{name}`.

        # Input

        - `{name}`: exact name of Pokemon to delete.

        # Output

        A [`Confirmation`] message, serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Deletes a Pokemon, using its name")]
#[utoipa::path(
    context_path = "/pokemon",
    tag = "pokemon",
    params(Name),
    responses(
        (status = OK, description = "Pokemon deleted", body = Confirmation),
        NotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[delete("/nombre/{name}", name = "pokemon_delete_by_name")]
pub async fn delete_by_name(name: Path<Name>, service: Data<pokemon::Service>) -> HttpResult {
    service.get_ref().delete_pokemon(name.pokemon_ref()).await?;

    Ok(HttpResponse::Ok().json(Confirmation::new(Confirmation::DELETED)))
}
