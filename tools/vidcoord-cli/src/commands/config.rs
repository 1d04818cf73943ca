//! Write or show the configuration file.

use std::path::{Path, PathBuf};

use vidcoord_common::config::{config_file_path, AppConfig};

/// Write a default config file unless one already exists.
pub fn init(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let target = path.clone().unwrap_or_else(config_file_path);
    if target.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            target.display()
        );
    }

    let config = AppConfig::default();
    match path {
        Some(path) => write_to(&config, &path)?,
        None => config
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?,
    }

    tracing::info!(path = %target.display(), "Wrote default config");
    println!("Wrote {}", target.display());
    Ok(())
}

/// Print the effective configuration as JSON.
pub fn show(config: &AppConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn write_to(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    config
        .save_to(path)
        .map_err(|e| anyhow::anyhow!("Failed to write config to {}: {e}", path.display()))
}
