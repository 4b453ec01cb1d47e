//! CLI command implementations.

pub mod render;
pub mod template;

use anyhow::{Context, Result};
use std::path::Path;
use tailforge_config::tailwind::{Platform, download_url};
use tailforge_config::{EnvSource, ProjectConfig};
use tracing::debug;

/// Load the project file and apply environment overrides.
pub fn load_project(path: &Path) -> Result<ProjectConfig> {
    let mut config = ProjectConfig::load_or_default(path)
        .with_context(|| format!("Failed to load project file: {}", path.display()))?;
    config.apply_env(&EnvSource::from_process());
    Ok(config)
}

pub fn theme_names(config: &ProjectConfig) -> Vec<&str> {
    tailforge_config::theme::theme_names(&config.themes)
}

pub fn tailwind_url(version: &str) -> Result<String> {
    let platform = Platform::current();
    debug!(system = %platform.system, processor = %platform.processor, "detected platform");

    let fragment = platform
        .filename_fragment()
        .context("No Tailwind CLI release for this platform")?;
    Ok(download_url(version, &fragment))
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
