//! Common utilities and helper functions shared across commands.

use crate::{config::AppConfig, context::DataContext, storage::BackendKind};
use anyhow::Context;
use std::path::PathBuf;

/// Text printed in place of a null column
pub const NULL_DISPLAY: &str = "NULL";

/// Settings given on the command line; each one beats config and environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub backend: Option<BackendKind>,
    pub database: Option<PathBuf>,
}

/// Build the effective configuration: file, then environment, then flags.
pub fn resolve_config(overrides: &ConfigOverrides) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(overrides.config.as_deref())
        .context("Failed to load configuration")?;
    config
        .apply_env()
        .context("Invalid environment configuration")?;

    if let Some(backend) = overrides.backend {
        config.backend = backend;
    }
    if let Some(database) = &overrides.database {
        config.database = Some(database.clone());
    }
    Ok(config)
}

/// Open the configured store
pub fn open_context(config: &AppConfig) -> anyhow::Result<DataContext> {
    let path = config.database_path()?;
    DataContext::open(config).with_context(|| {
        format!(
            "Failed to open {} store at {}",
            config.backend,
            path.display()
        )
    })
}

/// Render an optional column
pub fn or_null(value: Option<&str>) -> &str {
    value.unwrap_or(NULL_DISPLAY)
}
