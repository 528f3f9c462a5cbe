use std::env;
use std::sync::{Arc, Once};

use async_trait::async_trait;
use diesel::result::Error as DieselError;
use log::debug;
use pokemon_api::error::{Operation, QueryContext};
use pokemon_api::models::pokemon::{CreatePokemon, PatchPokemon, Pokemon};
use pokemon_api::service_env::SERVICE_ENV_VAR;
use pokemon_api::store::memory::MemoryStore;
use pokemon_api::store::PokemonStore;

use crate::integration_helpers::factories::pokemon::build_create_pokemons;

#[macro_export]
macro_rules! init_test_service {
    ($service_var:ident, $store:expr) => {
        $crate::integration_helpers::app::init_test_env();
        let $service_var =
            actix_web::test::init_service(pokemon_api::pokemon_api_app!($store)).await;
    };
}

/// Makes sure tests run in the default (production) environment.
pub fn init_test_env() {
    static INIT_TEST_ENV: Once = Once::new();
    INIT_TEST_ENV.call_once(|| {
        debug!("Clearing service environment variable");
        env::remove_var(SERVICE_ENV_VAR);
    });
}

pub fn empty_store() -> Arc<dyn PokemonStore> {
    Arc::new(MemoryStore::new())
}

/// Returns a store containing `count` Pokemon, with ids `1..=count`.
pub fn seeded_store(count: usize) -> Arc<dyn PokemonStore> {
    Arc::new(MemoryStore::with_pokemon(build_create_pokemons(count)).unwrap())
}

pub fn failing_store() -> Arc<dyn PokemonStore> {
    Arc::new(FailingStore)
}

/// Store whose every query fails, as if the database connection was broken.
struct FailingStore;

impl FailingStore {
    fn fail<T>(operation: Operation) -> pokemon_api::Result<T> {
        Err(DieselError::BrokenTransactionManager
            .with_query_context(operation, || format!("failing store cannot {}", operation)))
    }
}

#[async_trait]
impl PokemonStore for FailingStore {
    async fn list(&self) -> pokemon_api::Result<Vec<Pokemon>> {
        Self::fail(Operation::List)
    }

    async fn get_by_id(&self, _pokemon_id: i64) -> pokemon_api::Result<Pokemon> {
        Self::fail(Operation::Fetch)
    }

    async fn get_by_name(&self, _pokemon_name: &str) -> pokemon_api::Result<Pokemon> {
        Self::fail(Operation::Fetch)
    }

    async fn create(&self, _new_pokemon: &CreatePokemon) -> pokemon_api::Result<i64> {
        Self::fail(Operation::Create)
    }

    async fn update_by_id(
        &self,
        _pokemon_id: i64,
        _pokemon_patch: &PatchPokemon,
    ) -> pokemon_api::Result<usize> {
        Self::fail(Operation::Update)
    }

    async fn update_by_name(
        &self,
        _pokemon_name: &str,
        _pokemon_patch: &PatchPokemon,
    ) -> pokemon_api::Result<usize> {
        Self::fail(Operation::Update)
    }

    async fn delete_by_id(&self, _pokemon_id: i64) -> pokemon_api::Result<usize> {
        Self::fail(Operation::Delete)
    }

    async fn delete_by_name(&self, _pokemon_name: &str) -> pokemon_api::Result<usize> {
        Self::fail(Operation::Delete)
    }

    fn close(&self) {}
}
