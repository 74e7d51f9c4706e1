//! stitchlog web server: server-rendered pages for the tracker plus two JSON
//! search endpoints used for autocompletion.

pub mod cli;
pub mod handlers;
pub mod router;
pub mod state;
pub mod utils;
pub mod views;

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;
use crate::constants::{CONFIG_GENERATED, SERVER_LISTENING};
use crate::logger;
use crate::service::TrackerService;
use crate::storage::{LocalFileStorage, LocalStorage};

pub use cli::Cli;
use state::{AppState, SharedState};

/// Entry point: resolve configuration, open storage, start serving.
pub async fn run(cli: Cli) -> Result<()> {
    if let Some(path) = &cli.generate_config {
        Config::generate_default_config(path)?;
        println!("{CONFIG_GENERATED}: {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);
    config.validate()?;

    logger::init(&config.logging)?;
    info!("stitchlog starting");
    info!("  database: {}", config.storage.database_url);
    info!("  uploads: {}", config.storage.upload_dir.display());

    let state = build_state(&config).await?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    info!("{SERVER_LISTENING} http://{}", config.server.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Open the database and upload directory described by `config`.
pub async fn build_state(config: &Config) -> Result<SharedState> {
    let storage = LocalStorage::connect(&config.storage.database_url).await?;
    if !storage.has_data().await? {
        info!("No projects yet, starting with an empty tracker");
    }
    let files = LocalFileStorage::new(&config.storage.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload directory: {}", config.storage.upload_dir.display()))?;

    Ok(Arc::new(AppState {
        service: TrackerService::new(storage, Arc::new(files)),
        default_sort: config.default_sort(),
        max_upload_bytes: config.server.max_upload_bytes,
    }))
}
