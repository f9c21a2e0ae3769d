//! Runtime configuration sourced from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3022;

/// Fallback used when ADMIN_PASSWORD is not set.
const DEFAULT_ADMIN_PASSWORD: &str = "letmein";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub admin_password: String,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .with_context(|| "parse PORT")?;

        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            warn!("ADMIN_PASSWORD not set, falling back to the default password");
            DEFAULT_ADMIN_PASSWORD.to_string()
        });

        let data_dir =
            PathBuf::from(env::var("SHINDIG_DATA_DIR").unwrap_or_else(|_| "data".into()));
        let static_dir =
            PathBuf::from(env::var("SHINDIG_STATIC_DIR").unwrap_or_else(|_| "static".into()));

        Ok(Config {
            port,
            admin_password,
            data_dir,
            static_dir,
        })
    }
}
