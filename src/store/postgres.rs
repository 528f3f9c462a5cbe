//! [`PokemonStore`](crate::store::PokemonStore) adapter for PostgreSQL.

use diesel::QueryResult;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::implement_sql_store;
use crate::models::pokemon::CreatePokemon;

/// A pool of asynchronous PostgreSQL connections.
pub type Pool = diesel_async::pooled_connection::deadpool::Pool<AsyncPgConnection>;

implement_sql_store! {
    /// Pokemon store backed by a PostgreSQL database.
    ///
    /// Ids of new records are returned directly by the `INSERT` statement.
    pub struct PostgresStore(AsyncPgConnection);
}

impl PostgresStore {
    async fn insert_pokemon(
        connection: &mut Object<AsyncPgConnection>,
        new_pokemon: &CreatePokemon,
    ) -> QueryResult<i64> {
        use crate::schema::pokemon::dsl::*;

        diesel::insert_into(pokemon)
            .values(new_pokemon)
            .returning(id)
            .get_result(connection)
            .await
    }
}
