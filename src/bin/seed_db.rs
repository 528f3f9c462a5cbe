//! Seeds the Pokemon store with initial Pokemon data.
//!
//! See `README.md` for usage.

use std::env::current_exe;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use cargo_metadata::camino::Utf8PathBuf;
use cargo_metadata::MetadataCommand;
use log::{info, trace};
use pokemon_api::db::open_store;
use pokemon_api::helpers::env::load_optional_dotenv;
use pokemon_api::models::pokemon::{CreatePokemon, ImportPokemon};
use pokemon_api::services::pokemon::{Service, Upserted};
use simple_logger::SimpleLogger;

/// Main program body.
///
/// Loads Pokemon data from the CSV file located at `./seed/pokemon.csv` and saves each Pokemon
/// in the configured store. Pokemon that already exist (by name) are overwritten.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .init()
        .with_context(|| "failed to initialize logging facility")?;

    info!("Loading environment variables");
    load_optional_dotenv()
        .with_context(|| "failed to load `.env` file containing environment variables")?;

    info!("Starting Pokemon seeding program");
    let start_time = Instant::now();
    let seed_file_path = get_seed_file_path()?;

    info!("Loading Pokemon data from {}", seed_file_path);
    let new_pokemon = load_pokemon_from_seed_file(seed_file_path)?;

    info!("Opening Pokemon store");
    let store = open_store().with_context(|| "failed to open Pokemon store")?;
    let service = Service::new(store.clone());

    info!("Saving Pokemon into store");
    let result = save_pokemon(&service, &new_pokemon).await;
    store.close();
    result?;

    let elapsed = start_time.elapsed();
    info!("Pokemon store seed done in {:.4?}s.", elapsed.as_secs_f64());

    Ok(())
}

/// Returns the path to the seed Pokemon CSV file.
fn get_seed_file_path() -> anyhow::Result<Utf8PathBuf> {
    // First try looking in the directory of the current executable.
    let mut seed_file_path = current_exe()?;
    seed_file_path.pop();
    seed_file_path.push("seed");
    seed_file_path.push("pokemon.csv");
    if seed_file_path.is_file() {
        return seed_file_path
            .try_into()
            .with_context(|| "seed file path contains invalid UTF-8 characters");
    }

    // If we didn't find seed file yet, we must be in dev environment, so use cargo.
    let metadata = MetadataCommand::new()
        .exec()
        .with_context(|| "failed to get metadata to fetch workspace root")?;

    let mut seed_file_path = metadata.workspace_root;
    seed_file_path.push("seed");
    seed_file_path.push("pokemon.csv");

    Ok(seed_file_path)
}

/// Loads the Pokemon data from the seed CSV file.
///
/// Validation happens when each Pokemon is saved.
fn load_pokemon_from_seed_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<CreatePokemon>> {
    let csv_reader = csv::Reader::from_path(path)
        .with_context(|| "failed to load CSV file containing Pokemon data")?;

    let new_pokemon: Vec<CreatePokemon> = csv_reader
        .into_deserialize::<ImportPokemon>()
        .map(|row| row.map(Into::into))
        .collect::<Result<_, _>>()
        .with_context(|| "failed to load Pokemon data from CSV file")?;
    trace!("Found {} Pokemon in the seed CSV file", new_pokemon.len());

    Ok(new_pokemon)
}

/// Creates or overwrites the given Pokemon in the store.
async fn save_pokemon(service: &Service, new_pokemon: &[CreatePokemon]) -> anyhow::Result<()> {
    let (mut created_count, mut updated_count) = (0usize, 0usize);

    for pokemon in new_pokemon {
        match service
            .upsert_pokemon(pokemon)
            .await
            .with_context(|| format!("failed to save Pokemon {}", pokemon.name))?
        {
            Upserted::Created(_) => created_count += 1,
            Upserted::Updated => updated_count += 1,
        }
    }
    trace!("{} Pokemon created, {} Pokemon updated", created_count, updated_count);

    Ok(())
}
