//! Models used to create/update/load Pokemon from the store.
//!
//! Request bodies accept the historical field names of the service (`nombre`, `tipos`,
//! `descripcion` and `imagen`) as aliases; responses always use the English names.

pub mod validations;

use diesel_derives::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::{ToResponse, ToSchema};
use validations::validate_patch_not_empty;
use validator::Validate;

use crate::schema::pokemon;

#[cfg_attr(
    doc,
    doc = r"
        Base Pokemon entity model.

        Used to load Pokemon from the store. Both SQL backends map the same `pokemon` table.
    "
)]
#[cfg_attr(not(doc), doc = "Information about a Pokemon")]
#[derive(
    Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, Deserialize, ToSchema, ToResponse,
)]
#[diesel(table_name = pokemon, check_for_backend(diesel::pg::Pg, diesel::mysql::Mysql))]
#[response(
    description = "Pokemon information",
    example = json!({
        "id": 1,
        "name": "Bulbasaur",
        "types": "Grass, Poison",
        "description": "A strange seed was planted on its back at birth.",
        "image": "https://img.pokemondb.net/artwork/bulbasaur.jpg"
    }),
)]
pub struct Pokemon {
    /// Unique id of this Pokemon, generated by the store
    pub id: i64,

    /// Pokemon name; unique
    #[schema(example = "Bulbasaur")]
    pub name: String,

    /// Pokemon types, as free text (usually comma-separated)
    #[schema(example = "Grass, Poison")]
    pub types: String,

    /// Pokemon description
    pub description: String,

    /// Reference to an image of the Pokemon (usually a URL)
    #[schema(example = "https://img.pokemondb.net/artwork/bulbasaur.jpg")]
    pub image: String,
}

#[cfg_attr(
    doc,
    doc = r"
        Model used to insert a new Pokemon in the store.

        All fields are required and must be non-empty. The id is assigned by the store.
    "
)]
#[cfg_attr(not(doc), doc = "Information to create a new Pokemon")]
#[derive(Debug, Clone, PartialEq, Eq, Insertable, Serialize, Deserialize, Validate, ToSchema)]
#[diesel(table_name = pokemon)]
#[schema(example = json!({
    "name": "Bulbasaur",
    "types": "Grass, Poison",
    "description": "A strange seed was planted on its back at birth.",
    "image": "https://img.pokemondb.net/artwork/bulbasaur.jpg"
}))]
pub struct CreatePokemon {
    /// Pokemon name; must not already be used by another Pokemon
    #[serde(alias = "nombre")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    /// Pokemon types, as free text
    #[serde(alias = "tipos")]
    #[validate(length(min = 1, message = "types must not be empty"))]
    pub types: String,

    /// Pokemon description
    #[serde(alias = "descripcion")]
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,

    /// Reference to an image of the Pokemon
    #[serde(alias = "imagen")]
    #[validate(length(min = 1, message = "image must not be empty"))]
    pub image: String,
}

impl From<Pokemon> for CreatePokemon {
    /// Converts a [`Pokemon`] into a [`CreatePokemon`], dropping its [`id`](Pokemon::id).
    fn from(value: Pokemon) -> Self {
        Self {
            name: value.name,
            types: value.types,
            description: value.description,
            image: value.image,
        }
    }
}

#[cfg_attr(
    doc,
    doc = r#"
        Model used to "patch" a Pokemon in the store, e.g. update some fields only.

        The fields of this struct are the only columns a partial update can touch: fields
        that are `None` are skipped by the generated changeset. At least one field must be
        specified, and specified fields must be non-empty.
    "#
)]
#[cfg_attr(not(doc), doc = "Information to update specific fields of a Pokemon")]
#[derive(
    Debug, Clone, Default, PartialEq, Eq, AsChangeset, Serialize, Deserialize, Validate, ToSchema,
)]
#[diesel(table_name = pokemon)]
#[validate(schema(function = "validate_patch_not_empty", skip_on_field_errors = false))]
#[schema(example = json!({
    "types": "Grass, Poison",
    "image": "https://img.pokemondb.net/artwork/bulbasaur.jpg"
}))]
pub struct PatchPokemon {
    /// Pokemon name; must not already be used by another Pokemon
    #[serde(alias = "nombre", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,

    /// Pokemon types, as free text
    #[serde(alias = "tipos", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "types must not be empty"))]
    pub types: Option<String>,

    /// Pokemon description
    #[serde(alias = "descripcion", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,

    /// Reference to an image of the Pokemon
    #[serde(alias = "imagen", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "image must not be empty"))]
    pub image: Option<String>,
}

impl PatchPokemon {
    /// Returns `true` if no field would be updated by this patch.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.types.is_none()
            && self.description.is_none()
            && self.image.is_none()
    }

    /// Applies this patch to a [`Pokemon`], overwriting the fields that are specified.
    pub fn apply_to(&self, pokemon: &mut Pokemon) {
        if let Some(name) = &self.name {
            pokemon.name.clone_from(name);
        }
        if let Some(types) = &self.types {
            pokemon.types.clone_from(types);
        }
        if let Some(description) = &self.description {
            pokemon.description.clone_from(description);
        }
        if let Some(image) = &self.image {
            pokemon.image.clone_from(image);
        }
    }
}

impl From<CreatePokemon> for PatchPokemon {
    /// Converts a [`CreatePokemon`] into a [`PatchPokemon`] that overwrites every field.
    fn from(value: CreatePokemon) -> Self {
        Self {
            name: Some(value.name),
            types: Some(value.types),
            description: Some(value.description),
            image: Some(value.image),
        }
    }
}

/// Model used to import Pokemon in the store from the seed CSV file.
///
/// Used by the `seed_db` command to seed the store initially.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[allow(missing_docs)]
pub struct ImportPokemon {
    pub name: String,
    pub types: String,
    pub description: String,
    pub image: String,
}

impl From<ImportPokemon> for CreatePokemon {
    fn from(value: ImportPokemon) -> Self {
        Self {
            name: value.name,
            types: value.types,
            description: value.description,
            image: value.image,
        }
    }
}
