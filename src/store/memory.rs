//! In-process [`PokemonStore`] adapter.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::error::{Operation, QueryContext};
use crate::models::pokemon::{CreatePokemon, PatchPokemon, Pokemon};
use crate::store::PokemonStore;

/// Pokemon store keeping all records in memory.
///
/// Honors the same invariants as the SQL adapters: ids are generated in ascending order and
/// never reused, names are unique and missing records are reported as
/// [`NotFound`](DieselError::NotFound). Records are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    next_id: i64,
    records: BTreeMap<i64, Pokemon>,
}

impl Default for State {
    fn default() -> Self {
        Self { next_id: 1, records: BTreeMap::new() }
    }
}

impl State {
    fn find_id_by_name(&self, pokemon_name: &str) -> Option<i64> {
        self.records
            .values()
            .find(|pokemon| pokemon.name == pokemon_name)
            .map(|pokemon| pokemon.id)
    }

    fn check_name_available(
        &self,
        pokemon_name: &str,
        owner_id: Option<i64>,
    ) -> Result<(), DieselError> {
        match self.find_id_by_name(pokemon_name) {
            Some(existing_id) if Some(existing_id) != owner_id => Err(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new(format!("duplicate pokemon name: {}", pokemon_name)),
            )),
            _ => Ok(()),
        }
    }

    fn patch(
        &mut self,
        pokemon_id: Option<i64>,
        pokemon_patch: &PatchPokemon,
    ) -> Result<usize, DieselError> {
        let Some(pokemon_id) = pokemon_id.filter(|key| self.records.contains_key(key)) else {
            return Ok(0);
        };

        if let Some(new_name) = &pokemon_patch.name {
            self.check_name_available(new_name, Some(pokemon_id))?;
        }
        if let Some(pokemon) = self.records.get_mut(&pokemon_id) {
            pokemon_patch.apply_to(pokemon);
        }
        Ok(1)
    }

    fn remove(&mut self, pokemon_id: Option<i64>) -> usize {
        pokemon_id
            .and_then(|pokemon_id| self.records.remove(&pokemon_id))
            .map_or(0, |_| 1)
    }
}

impl MemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new store containing the given Pokemon.
    ///
    /// Ids are assigned in iteration order, starting at 1.
    pub fn with_pokemon<I>(pokemon: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = CreatePokemon>,
    {
        let store = Self::new();
        {
            let mut state = store.state();
            for new_pokemon in pokemon {
                Self::insert(&mut state, &new_pokemon)
                    .with_query_context(Operation::Create, || {
                        format!("failed to insert new pokemon named {}", new_pokemon.name)
                    })?;
            }
        }
        Ok(store)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // State is always left consistent, even if a panic occurred while holding the lock.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(state: &mut State, new_pokemon: &CreatePokemon) -> Result<i64, DieselError> {
        state.check_name_available(&new_pokemon.name, None)?;

        let new_id = state.next_id;
        state.next_id += 1;
        state.records.insert(
            new_id,
            Pokemon {
                id: new_id,
                name: new_pokemon.name.clone(),
                types: new_pokemon.types.clone(),
                description: new_pokemon.description.clone(),
                image: new_pokemon.image.clone(),
            },
        );
        Ok(new_id)
    }
}

#[async_trait]
impl PokemonStore for MemoryStore {
    async fn list(&self) -> crate::Result<Vec<Pokemon>> {
        Ok(self.state().records.values().cloned().collect())
    }

    async fn get_by_id(&self, pokemon_id: i64) -> crate::Result<Pokemon> {
        self.state()
            .records
            .get(&pokemon_id)
            .cloned()
            .ok_or(DieselError::NotFound)
            .with_query_context(Operation::Fetch, || {
                format!("failed to fetch pokemon with id {}", pokemon_id)
            })
    }

    async fn get_by_name(&self, pokemon_name: &str) -> crate::Result<Pokemon> {
        let state = self.state();
        state
            .find_id_by_name(pokemon_name)
            .and_then(|pokemon_id| state.records.get(&pokemon_id).cloned())
            .ok_or(DieselError::NotFound)
            .with_query_context(Operation::Fetch, || {
                format!("failed to fetch pokemon named {}", pokemon_name)
            })
    }

    async fn create(&self, new_pokemon: &CreatePokemon) -> crate::Result<i64> {
        Self::insert(&mut self.state(), new_pokemon).with_query_context(Operation::Create, || {
            format!("failed to insert new pokemon named {}", new_pokemon.name)
        })
    }

    async fn update_by_id(
        &self,
        pokemon_id: i64,
        pokemon_patch: &PatchPokemon,
    ) -> crate::Result<usize> {
        self.state()
            .patch(Some(pokemon_id), pokemon_patch)
            .with_query_context(Operation::Update, || {
                format!("failed to update pokemon with id {}", pokemon_id)
            })
    }

    async fn update_by_name(
        &self,
        pokemon_name: &str,
        pokemon_patch: &PatchPokemon,
    ) -> crate::Result<usize> {
        let mut state = self.state();
        let pokemon_id = state.find_id_by_name(pokemon_name);
        state
            .patch(pokemon_id, pokemon_patch)
            .with_query_context(Operation::Update, || {
                format!("failed to update pokemon named {}", pokemon_name)
            })
    }

    async fn delete_by_id(&self, pokemon_id: i64) -> crate::Result<usize> {
        Ok(self.state().remove(Some(pokemon_id)))
    }

    async fn delete_by_name(&self, pokemon_name: &str) -> crate::Result<usize> {
        let mut state = self.state();
        let pokemon_id = state.find_id_by_name(pokemon_name);
        Ok(state.remove(pokemon_id))
    }

    fn close(&self) {}
}
