//! Helper macros used to generate SQL store adapters.

/// Macro to generate a [`PokemonStore`](crate::store::PokemonStore) adapter backed by a pool of
/// [`diesel_async`] connections.
///
/// Queries are identical across SQL backends and built from [`store::sql`](crate::store::sql),
/// except for the way the id of a new record is fetched. The generated type therefore expects an inherent method with this signature:
///
/// ```ignore
/// async fn insert_pokemon(
///     connection: &mut Object<Conn>,
///     new_pokemon: &CreatePokemon,
/// ) -> diesel::QueryResult<i64>;
/// ```
///
/// # Examples
///
/// ```ignore
/// use pokemon_api::implement_sql_store;
///
/// implement_sql_store! {
///     /// Pokemon store backed by PostgreSQL.
///     pub struct PostgresStore(diesel_async::AsyncPgConnection);
/// }
/// ```
#[macro_export]
macro_rules! implement_sql_store {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident($conn:ty);
    ) => {
        $(#[$attr])*
        #[derive(Clone)]
        $vis struct $name {
            pool: diesel_async::pooled_connection::deadpool::Pool<$conn>,
        }

        impl $name {
            /// Creates a new store using the provided connection pool.
            pub fn new(pool: diesel_async::pooled_connection::deadpool::Pool<$conn>) -> Self {
                Self { pool }
            }

            async fn get_pooled_connection(
                &self,
            ) -> $crate::Result<diesel_async::pooled_connection::deadpool::Object<$conn>> {
                Ok(self.pool.get().await?)
            }
        }

        #[async_trait::async_trait]
        impl $crate::store::PokemonStore for $name {
            async fn list(&self) -> $crate::Result<Vec<$crate::models::pokemon::Pokemon>> {
                use diesel::{QueryDsl, SelectableHelper};
                use diesel_async::RunQueryDsl;
                use $crate::error::{Operation, QueryContext};
                use $crate::models::pokemon::Pokemon;

                let mut connection = self.get_pooled_connection().await?;

                $crate::store::sql::all_by_id()
                    .select(Pokemon::as_select())
                    .load(&mut connection)
                    .await
                    .with_query_context(Operation::List, || "failed to list pokemon")
            }

            async fn get_by_id(
                &self,
                pokemon_id: i64,
            ) -> $crate::Result<$crate::models::pokemon::Pokemon> {
                use diesel::{QueryDsl, SelectableHelper};
                use diesel_async::RunQueryDsl;
                use $crate::error::{Operation, QueryContext};
                use $crate::models::pokemon::Pokemon;

                let mut connection = self.get_pooled_connection().await?;

                $crate::store::sql::by_id(pokemon_id)
                    .select(Pokemon::as_select())
                    .first(&mut connection)
                    .await
                    .with_query_context(Operation::Fetch, || {
                        format!("failed to fetch pokemon with id {}", pokemon_id)
                    })
            }

            async fn get_by_name(
                &self,
                pokemon_name: &str,
            ) -> $crate::Result<$crate::models::pokemon::Pokemon> {
                use diesel::{QueryDsl, SelectableHelper};
                use diesel_async::RunQueryDsl;
                use $crate::error::{Operation, QueryContext};
                use $crate::models::pokemon::Pokemon;

                let mut connection = self.get_pooled_connection().await?;

                $crate::store::sql::by_name(pokemon_name)
                    .select(Pokemon::as_select())
                    .first(&mut connection)
                    .await
                    .with_query_context(Operation::Fetch, || {
                        format!("failed to fetch pokemon named {}", pokemon_name)
                    })
            }

            async fn create(
                &self,
                new_pokemon: &$crate::models::pokemon::CreatePokemon,
            ) -> $crate::Result<i64> {
                use $crate::error::{Operation, QueryContext};

                let mut connection = self.get_pooled_connection().await?;

                Self::insert_pokemon(&mut connection, new_pokemon)
                    .await
                    .with_query_context(Operation::Create, || {
                        format!("failed to insert new pokemon named {}", new_pokemon.name)
                    })
            }

            async fn update_by_id(
                &self,
                pokemon_id: i64,
                pokemon_patch: &$crate::models::pokemon::PatchPokemon,
            ) -> $crate::Result<usize> {
                use diesel::update;
                use diesel_async::RunQueryDsl;
                use $crate::error::{Operation, QueryContext};

                let mut connection = self.get_pooled_connection().await?;

                update($crate::store::sql::by_id(pokemon_id))
                    .set(pokemon_patch)
                    .execute(&mut connection)
                    .await
                    .with_query_context(Operation::Update, || {
                        format!("failed to update pokemon with id {}", pokemon_id)
                    })
            }

            async fn update_by_name(
                &self,
                pokemon_name: &str,
                pokemon_patch: &$crate::models::pokemon::PatchPokemon,
            ) -> $crate::Result<usize> {
                use diesel::update;
                use diesel_async::RunQueryDsl;
                use $crate::error::{Operation, QueryContext};

                let mut connection = self.get_pooled_connection().await?;

                update($crate::store::sql::by_name(pokemon_name))
                    .set(pokemon_patch)
                    .execute(&mut connection)
                    .await
                    .with_query_context(Operation::Update, || {
                        format!("failed to update pokemon named {}", pokemon_name)
                    })
            }

            async fn delete_by_id(&self, pokemon_id: i64) -> $crate::Result<usize> {
                use diesel::delete;
                use diesel_async::RunQueryDsl;
                use $crate::error::{Operation, QueryContext};

                let mut connection = self.get_pooled_connection().await?;

                delete($crate::store::sql::by_id(pokemon_id))
                    .execute(&mut connection)
                    .await
                    .with_query_context(Operation::Delete, || {
                        format!("failed to delete pokemon with id {}", pokemon_id)
                    })
            }

            async fn delete_by_name(&self, pokemon_name: &str) -> $crate::Result<usize> {
                use diesel::delete;
                use diesel_async::RunQueryDsl;
                use $crate::error::{Operation, QueryContext};

                let mut connection = self.get_pooled_connection().await?;

                delete($crate::store::sql::by_name(pokemon_name))
                    .execute(&mut connection)
                    .await
                    .with_query_context(Operation::Delete, || {
                        format!("failed to delete pokemon named {}", pokemon_name)
                    })
            }

            fn close(&self) {
                self.pool.close();
            }
        }
    };
}
