//! [`PokemonStore`](crate::store::PokemonStore) adapter for MySQL (and MariaDB).

use diesel::result::Error as DieselError;
use diesel::{define_sql_function, QueryResult};
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::{AsyncMysqlConnection, RunQueryDsl};

use crate::implement_sql_store;
use crate::models::pokemon::CreatePokemon;

/// A pool of asynchronous MySQL connections.
pub type Pool = diesel_async::pooled_connection::deadpool::Pool<AsyncMysqlConnection>;

define_sql_function! {
    /// Returns the first id generated by the most recent `INSERT` on the current connection.
    fn last_insert_id() -> diesel::sql_types::Unsigned<diesel::sql_types::BigInt>;
}

implement_sql_store! {
    /// Pokemon store backed by a MySQL database.
    ///
    /// MySQL does not support `RETURNING`, so ids of new records are read with
    /// `LAST_INSERT_ID()` on the connection that performed the `INSERT`.
    pub struct MysqlStore(AsyncMysqlConnection);
}

impl MysqlStore {
    async fn insert_pokemon(
        connection: &mut Object<AsyncMysqlConnection>,
        new_pokemon: &CreatePokemon,
    ) -> QueryResult<i64> {
        use crate::schema::pokemon::dsl::*;

        diesel::insert_into(pokemon)
            .values(new_pokemon)
            .execute(connection)
            .await?;

        let new_id: u64 = diesel::select(last_insert_id()).get_result(connection).await?;
        i64::try_from(new_id).map_err(|err| DieselError::DeserializationError(err.into()))
    }
}
