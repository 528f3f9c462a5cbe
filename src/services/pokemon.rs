//! Service used to load and save Pokemon. Used by the Pokemon REST API.

use std::fmt;
use std::sync::Arc;

use diesel::NotFound;
use log::trace;
use validator::Validate;

use crate::error::{Operation, QueryContext};
use crate::models::pokemon::{CreatePokemon, PatchPokemon, Pokemon};
use crate::store::PokemonStore;

/// Reference to a single Pokemon, either by id or by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PokemonRef<'a> {
    /// Pokemon with the given id.
    Id(i64),

    /// Pokemon with the given name.
    Name(&'a str),
}

impl fmt::Display for PokemonRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(pokemon_id) => write!(f, "with id {}", pokemon_id),
            Self::Name(pokemon_name) => write!(f, "named {}", pokemon_name),
        }
    }
}

/// Outcome of [`Service::upsert_pokemon`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Upserted {
    /// A new Pokemon was created with the given id.
    Created(i64),

    /// An existing Pokemon with the same name was updated.
    Updated,
}

/// Service implementation for [`Pokemon`] entities.
///
/// This type contains the business logic to fetch/save Pokemon through a [`PokemonStore`].
/// It is used by the [Pokemon REST API endpoint implementations](crate::api::pokemon).
///
/// Input is always validated before the store is accessed.
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn PokemonStore>,
}

impl Service {
    /// Creates a new Pokemon service using the provided [`PokemonStore`].
    pub fn new(store: Arc<dyn PokemonStore>) -> Self {
        Self { store }
    }

    /// Returns all [`Pokemon`]s, ordered by id.
    pub async fn get_pokemons(&self) -> crate::Result<Vec<Pokemon>> {
        self.store.list().await
    }

    /// Returns the [`Pokemon`] referred to by `pokemon_ref`.
    pub async fn get_pokemon(&self, pokemon_ref: PokemonRef<'_>) -> crate::Result<Pokemon> {
        match pokemon_ref {
            PokemonRef::Id(pokemon_id) => self.store.get_by_id(pokemon_id).await,
            PokemonRef::Name(pokemon_name) => self.store.get_by_name(pokemon_name).await,
        }
    }

    /// Creates a new [`Pokemon`] and returns its id.
    pub async fn create_pokemon(&self, new_pokemon: &CreatePokemon) -> crate::Result<i64> {
        new_pokemon.validate()?;

        let new_id = self.store.create(new_pokemon).await?;
        trace!("Created pokemon {} with id {}", new_pokemon.name, new_id);

        Ok(new_id)
    }

    /// Updates the fields specified in `pokemon_patch` for the [`Pokemon`] referred to by
    /// `pokemon_ref`.
    ///
    /// Fails with an input error if the patch is empty or contains empty values.
    pub async fn update_pokemon(
        &self,
        pokemon_ref: PokemonRef<'_>,
        pokemon_patch: &PatchPokemon,
    ) -> crate::Result<()> {
        pokemon_patch.validate()?;

        let updated_count = match pokemon_ref {
            PokemonRef::Id(pokemon_id) => self.store.update_by_id(pokemon_id, pokemon_patch).await,
            PokemonRef::Name(pokemon_name) => {
                self.store.update_by_name(pokemon_name, pokemon_patch).await
            },
        }?;

        Self::expect_affected(updated_count, Operation::Update, pokemon_ref)
    }

    /// Deletes the [`Pokemon`] referred to by `pokemon_ref`.
    pub async fn delete_pokemon(&self, pokemon_ref: PokemonRef<'_>) -> crate::Result<()> {
        let deleted_count = match pokemon_ref {
            PokemonRef::Id(pokemon_id) => self.store.delete_by_id(pokemon_id).await,
            PokemonRef::Name(pokemon_name) => self.store.delete_by_name(pokemon_name).await,
        }?;

        Self::expect_affected(deleted_count, Operation::Delete, pokemon_ref)
    }

    /// Creates a [`Pokemon`], or overwrites the existing one if the name is already used.
    ///
    /// Used to seed the store.
    pub async fn upsert_pokemon(&self, new_pokemon: &CreatePokemon) -> crate::Result<Upserted> {
        new_pokemon.validate()?;

        let pokemon_ref = PokemonRef::Name(&new_pokemon.name);
        let updated_count = self
            .store
            .update_by_name(&new_pokemon.name, &new_pokemon.clone().into())
            .await?;

        match updated_count {
            0 => Ok(Upserted::Created(self.store.create(new_pokemon).await?)),
            _ => {
                trace!("Pokemon {} already existed and was updated", pokemon_ref);
                Ok(Upserted::Updated)
            },
        }
    }

    /// Turns an affected-row count of 0 into a not-found error.
    fn expect_affected(
        affected_count: usize,
        operation: Operation,
        pokemon_ref: PokemonRef<'_>,
    ) -> crate::Result<()> {
        match affected_count {
            0 => Err(NotFound.with_query_context(operation, || {
                format!("no pokemon {} to {}", pokemon_ref, operation)
            })),
            _ => Ok(()),
        }
    }
}
