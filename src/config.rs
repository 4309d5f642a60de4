use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

use crate::importer::MAX_BATCH_SIZE;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub movies_csv: PathBuf,
    pub import_batch_size: usize,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "5000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let movies_csv = std::env::var("MOVIES_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("movie_plots.csv"));

        let import_batch_size: usize = std::env::var("IMPORT_BATCH_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1000)
            .clamp(1, MAX_BATCH_SIZE);

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("react_app/build"));

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            movies_csv,
            import_batch_size,
            static_dir,
        })
    }
}
