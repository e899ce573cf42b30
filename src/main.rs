//! meteo: current weather for Spanish provinces.
//!
//! Usage examples
//! --------------
//!
//! - List the provinces and their slugs
//!   $ meteo provinces
//!
//! - Current weather in a province's capital (needs `OWM_API_KEY`)
//!   $ meteo weather sevilla
//!
//! - Interactive browsing, one slug per line; a new line supersedes the
//!   lookup still in flight
//!   $ meteo browse
//!
//! - Recently viewed provinces and favorites
//!   $ meteo recents
//!   $ meteo recents --clear
//!   $ meteo favorites toggle lugo
mod args;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use meteo_core::{AppError, Config};
use meteo_provinces::ProvinceDirectory;
use meteo_services::{
    FileStore, KeyValueStore, LookupState, MemoryStore, ProvinceLookup, SlugList,
};
use meteo_weather::OpenWeatherClient;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::args::{CliArgs, Commands, FavoritesAction};

type Store = Arc<dyn KeyValueStore>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();

    let (config, validation) = Config::load_validated(args.config.as_deref())?;
    meteo_core::init(&config.logging.level)?;
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let directory = ProvinceDirectory::spain();
    let store = open_store(&config);

    match args.command {
        Commands::Provinces => {
            println!("{}", render::provinces(directory.all()));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Weather { slug } => {
            let lookup = build_lookup(&config, directory, store)?;
            let state = lookup.navigate(&slug).await;
            println!("{}", render::state(&state));
            Ok(exit_code(&state))
        }
        Commands::Browse => {
            let lookup = Arc::new(build_lookup(&config, directory, store)?);
            browse(lookup).await
        }
        Commands::Recents { clear } => {
            let recents = SlugList::recents(store);
            if clear {
                return storage_result(recents.clear());
            }
            let slugs = recents.read();
            if slugs.is_empty() {
                println!("No hay provincias recientes");
            } else {
                println!("{}", render::provinces(directory.resolve_slugs(&slugs)));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Favorites { action } => {
            let favorites = SlugList::favorites(store);
            match action {
                None => {
                    let slugs = favorites.read();
                    if slugs.is_empty() {
                        println!("No hay provincias favoritas");
                    } else {
                        println!("{}", render::provinces(directory.resolve_slugs(&slugs)));
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Some(FavoritesAction::Toggle { slug }) => {
                    if directory.find_by_slug(&slug).is_none() {
                        eprintln!("{}", render::NOT_FOUND);
                        return Ok(ExitCode::FAILURE);
                    }
                    match favorites.toggle(&slug) {
                        Ok(updated) => {
                            let verb = if updated.contains(&slug) {
                                "añadida a"
                            } else {
                                "eliminada de"
                            };
                            println!("{} {} favoritos", slug, verb);
                            Ok(ExitCode::SUCCESS)
                        }
                        Err(e) => storage_result(Err(e)),
                    }
                }
                Some(FavoritesAction::Clear) => storage_result(favorites.clear()),
            }
        }
    }
}

/// File store under the configured data directory, or an in-memory one when
/// the directory cannot be created.
fn open_store(config: &Config) -> Store {
    match FileStore::open(&config.storage.data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!("Falling back to in-memory storage: {}", e);
            Arc::new(MemoryStore::new())
        }
    }
}

fn build_lookup(
    config: &Config,
    directory: &'static ProvinceDirectory,
    store: Store,
) -> Result<ProvinceLookup<Store>> {
    let client = OpenWeatherClient::new(&config.weather)?;
    if !client.has_api_key() {
        tracing::warn!("No weather API key configured; lookups will fail");
    }
    Ok(ProvinceLookup::new(
        directory,
        Arc::new(client),
        SlugList::recents(store),
    ))
}

/// Each stdin line starts a new lookup; the one still in flight is superseded
/// and its outcome is never printed.
async fn browse(lookup: Arc<ProvinceLookup<Store>>) -> Result<ExitCode> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = None;

    while let Some(line) = lines.next_line().await? {
        let slug = line.trim();
        if slug.is_empty() {
            continue;
        }

        let ticket = lookup.begin(slug);
        println!("{}", render::state(&lookup.state()));

        let task = tokio::spawn({
            let lookup = lookup.clone();
            async move {
                let state = lookup.run(ticket.clone()).await;
                if !ticket.is_cancelled() {
                    println!("{}", render::state(&state));
                }
                state
            }
        });
        last = Some(task);
    }

    let code = match last {
        Some(task) => exit_code(&task.await?),
        None => ExitCode::SUCCESS,
    };
    Ok(code)
}

fn exit_code(state: &LookupState) -> ExitCode {
    match state {
        LookupState::Success(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn storage_result(result: Result<(), meteo_core::StorageError>) -> Result<ExitCode> {
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!("Storage operation failed: {}", e);
            eprintln!("{}", AppError::Storage(e).user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
