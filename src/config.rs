//! Application configuration
//!
//! Settings come from, lowest precedence first: built-in defaults, a TOML
//! file, environment variables, then command-line flags (applied by the
//! binary).
//!
//! ```toml
//! backend = "document"
//! database = "/var/lib/futebol/futebol.json"
//!
//! [aliases]
//! FURIA = "FUR"
//! LOUD = "LOD"
//! ```
//!
//! An `[aliases]` table replaces the built-in aliases rather than extending
//! them.

use crate::error::{FutebolError, Result};
use crate::query::AliasTable;
use crate::storage::BackendKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "futebol.toml";
pub const BACKEND_ENV_VAR: &str = "FUTEBOL_BACKEND";
pub const DATABASE_ENV_VAR: &str = "FUTEBOL_DATABASE";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendKind,
    /// Database file; defaults to the per-user data directory.
    pub database: Option<PathBuf>,
    pub aliases: AliasTable,
}

impl AppConfig {
    /// Load from `path`, or from `futebol.toml` in the working directory.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE_NAME), false),
        };

        if !path.exists() {
            if explicit {
                return Err(FutebolError::Config {
                    message: format!("config file {} not found", path.display()),
                });
            }
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), backend = %config.backend, "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `FUTEBOL_BACKEND` / `FUTEBOL_DATABASE` from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` in place of the process environment.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(backend) = lookup(BACKEND_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.backend = backend.parse()?;
        }
        if let Some(database) = lookup(DATABASE_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.database = Some(PathBuf::from(database));
        }
        Ok(())
    }

    /// Configured database path, or the default for the backend.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => default_database_path(self.backend),
        }
    }
}

/// Path: <data dir>/futebol-app/futebol.{db,json}
pub fn default_database_path(backend: BackendKind) -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| FutebolError::Config {
        message: "Could not determine data directory".to_string(),
    })?;
    Ok(data_dir
        .join("futebol-app")
        .join(backend.default_file_name()))
}
