//! Project rendering and validation.

use anyhow::{Context, Result, anyhow, bail};
use std::path::{Path, PathBuf};
use tailforge_config::theme::{theme_file_paths, write_theme_files};
use tailforge_config::{ProjectConfig, build_context};
use tailforge_core::Template;
use tracing::{debug, info};

/// A file written by `render`.
#[derive(Debug)]
pub struct Written {
    pub name: &'static str,
    pub path: PathBuf,
}

fn outputs(config: &ProjectConfig) -> [(&'static str, &Path, &Path); 2] {
    [
        (
            "tailwind config",
            config.config_template.as_path(),
            config.config_target.as_path(),
        ),
        (
            "tailwind base css",
            config.css_template.as_path(),
            config.css_target.as_path(),
        ),
    ]
}

/// Render theme files, tailwind.config.js and the base stylesheet.
///
/// Both templates are rendered before anything is written.
pub fn render(config: &ProjectConfig) -> Result<Vec<Written>> {
    let theme_files = match &config.theme_css_dir {
        Some(dir) => theme_file_paths(&config.themes, dir)?,
        None => Vec::new(),
    };

    let mut rendered = Vec::new();
    for (name, template, target) in outputs(config) {
        let template = load_template(config, template)
            .with_context(|| format!("Failed to load {} template", name))?;
        let subs = build_context(config, target_dir(target), &theme_files);
        let doc = template
            .render(&subs)
            .with_context(|| format!("Failed to render {}", name))?;
        rendered.push((name, target, doc));
    }

    let mut written = Vec::new();

    if let Some(dir) = &config.theme_css_dir {
        for path in write_theme_files(&config.themes, dir)? {
            info!(path = %path.display(), "wrote theme css");
            written.push(Written {
                name: "theme css",
                path,
            });
        }
    }

    for (name, target, doc) in rendered {
        super::write_file(target, doc.as_str())?;
        info!(path = %target.display(), "wrote {}", name);
        written.push(Written {
            name,
            path: target.to_path_buf(),
        });
    }

    Ok(written)
}

/// Check that both templates exist, parse, and have every placeholder
/// covered.
pub fn validate(config: &ProjectConfig) -> Result<()> {
    let mut problems = Vec::new();

    for (name, template, target) in outputs(config) {
        match load_template(config, template) {
            Ok(template) => {
                let subs = build_context(config, target_dir(target), &[]);
                let missing = template.missing(&subs);
                if !missing.is_empty() {
                    problems.push(format!(
                        "{}: unresolved placeholders: {}",
                        name,
                        missing.join(", ")
                    ));
                }
            }
            Err(e) => problems.push(format!("{}: {:#}", name, e)),
        }
    }

    if let Some(dir) = &config.theme_css_dir {
        if let Err(e) = theme_file_paths(&config.themes, dir) {
            problems.push(format!("theme css: {}", e));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        bail!(
            "Configuration has {} problem(s):\n  {}",
            problems.len(),
            problems.join("\n  ")
        )
    }
}

fn load_template(config: &ProjectConfig, template: &Path) -> Result<Template> {
    let path = config
        .resolve_template(template)
        .ok_or_else(|| anyhow!("template not found: {}", template.display()))?;
    debug!(path = %path.display(), "loading template");

    Template::from_file(&path)
        .with_context(|| format!("Failed to parse template: {}", path.display()))
}

fn target_dir(target: &Path) -> &Path {
    target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}
