//! Storage of Pokemon records.
//!
//! The [`PokemonStore`] trait abstracts the backend used to persist Pokemon. One adapter
//! exists per supported backend:
//!
//! | Backend    | Adapter                                  |
//! |------------|------------------------------------------|
//! | PostgreSQL | [`PostgresStore`](postgres::PostgresStore) |
//! | MySQL      | [`MysqlStore`](mysql::MysqlStore)          |
//! | In-memory  | [`MemoryStore`](memory::MemoryStore)       |
//!
//! Use [`db::open_store`](crate::db::open_store) to create the adapter matching the current
//! configuration.

#[doc(hidden)]
pub mod macros;
pub mod memory;
pub mod mysql;
pub mod postgres;
pub mod sql;

use async_trait::async_trait;

use crate::models::pokemon::{CreatePokemon, PatchPokemon, Pokemon};

/// Storage backend for [`Pokemon`] records.
///
/// Adapters report failures as [`Query`](crate::Error::Query) errors wrapping a
/// [`diesel::result::Error`]. In particular:
///
/// * a missing record is reported as [`NotFound`](diesel::result::Error::NotFound) by the `get_*` methods
/// * a duplicate name is reported as a [`UniqueViolation`](diesel::result::DatabaseErrorKind::UniqueViolation)
///
/// Update and delete methods report the number of affected rows instead of failing when no
/// record matches.
#[async_trait]
pub trait PokemonStore: Send + Sync {
    /// Returns all Pokemon, ordered by ascending id.
    async fn list(&self) -> crate::Result<Vec<Pokemon>>;

    /// Returns the Pokemon with the given id.
    async fn get_by_id(&self, pokemon_id: i64) -> crate::Result<Pokemon>;

    /// Returns the Pokemon with the given name.
    async fn get_by_name(&self, pokemon_name: &str) -> crate::Result<Pokemon>;

    /// Inserts a new Pokemon and returns the id assigned to it.
    async fn create(&self, new_pokemon: &CreatePokemon) -> crate::Result<i64>;

    /// Updates the fields specified in `pokemon_patch` for the Pokemon with the given id.
    ///
    /// Returns the number of affected rows.
    async fn update_by_id(&self, pokemon_id: i64, pokemon_patch: &PatchPokemon)
        -> crate::Result<usize>;

    /// Updates the fields specified in `pokemon_patch` for the Pokemon with the given name.
    ///
    /// Returns the number of affected rows.
    async fn update_by_name(
        &self,
        pokemon_name: &str,
        pokemon_patch: &PatchPokemon,
    ) -> crate::Result<usize>;

    /// Deletes the Pokemon with the given id and returns the number of affected rows.
    async fn delete_by_id(&self, pokemon_id: i64) -> crate::Result<usize>;

    /// Deletes the Pokemon with the given name and returns the number of affected rows.
    async fn delete_by_name(&self, pokemon_name: &str) -> crate::Result<usize>;

    /// Releases resources held by the store.
    ///
    /// For SQL adapters, this closes the connection pool; subsequent calls fail with a
    /// [`Pool`](crate::Error::Pool) error.
    fn close(&self);
}
