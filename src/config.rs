//! Service configuration from environment variables
//!
//! - `ARTIFACT_DIR`: fitted artifacts (default `artifacts`)
//! - `STATIC_DIR`: crop images served under `/static` (default `static`)
//! - `PORT`: listen port (default 3000)

use std::path::PathBuf;

pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_PORT: u16 = 3000;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "crop_recommender=info,tower_http=debug,axum=debug,warn";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub artifact_dir: PathBuf,
    pub static_dir: PathBuf,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or unparseable values
    /// keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let artifact_dir = lookup("ARTIFACT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.artifact_dir);

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        Self {
            artifact_dir,
            static_dir,
            port,
        }
    }

    pub fn log(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  ARTIFACT_DIR: {:?}", self.artifact_dir);
        tracing::info!("  STATIC_DIR: {:?}", self.static_dir);
        tracing::info!("  PORT: {}", self.port);
    }
}
