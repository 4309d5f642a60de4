mod config;
mod db;
mod entities;
mod error;
mod importer;
mod models;
mod routes;
mod store;

use std::sync::Arc;

use crate::{config::Config, importer::ImportOutcome, store::MovieStore};

pub struct AppState {
    pub store: MovieStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,moviedb=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url).await?;

    match importer::import_csv(&db, &config.movies_csv, config.import_batch_size).await? {
        ImportOutcome::Imported { rows } => tracing::info!(rows, "seeded movie table"),
        ImportOutcome::AlreadyImported { .. } | ImportOutcome::Missing => {},
    }

    let state = Arc::new(AppState { store: MovieStore::new(db) });
    let app = routes::router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
