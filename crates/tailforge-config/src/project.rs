//! Project configuration parsing.
//!
//! A project file looks like:
//!
//! ```kdl
//! config-template "tailwind/tailwind.config.js"
//! config-target "src/htmx/tailwindtheme/tailwind.config.js"
//! css-template "tailwind/styles.css"
//! css-target "src/htmx/tailwindtheme/styles.css"
//! theme-css-dir "src/htmx/tailwindtheme/themes"
//! template-dirs "templates" "src/htmx/templates"
//! css-files "src/htmx/static/extra.css"
//! theme-override "{}"
//! themes {
//!     theme "dark"
//!     theme "argus" {
//!         color-scheme "light"
//!         primary "#006d91"
//!     }
//! }
//! ```
//!
//! Every node is optional. Relative paths are relative to the directory
//! holding the project file.

use crate::env::{DAISYUI_THEMES, EnvSource, TAILWIND_THEME_OVERRIDE};
use crate::theme::{Theme, check_unique, default_themes};
use crate::{ConfigError, ConfigResult};
use kdl::{KdlDocument, KdlNode, KdlValue};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_PROJECT_FILE: &str = "tailforge.kdl";
pub const DEFAULT_CONFIG_TEMPLATE: &str = "tailwind/tailwind.config.js";
pub const DEFAULT_CSS_TEMPLATE: &str = "tailwind/styles.css";
pub const DEFAULT_CONFIG_TARGET: &str = "src/argus/htmx/tailwindtheme/tailwind.config.js";
pub const DEFAULT_CSS_TARGET: &str = "src/argus/htmx/tailwindtheme/styles.css";
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Everything needed to materialize a project's Tailwind files.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Directory relative paths are resolved against.
    pub base_dir: PathBuf,
    /// Template for tailwind.config.js.
    pub config_template: PathBuf,
    /// Where the rendered tailwind.config.js goes.
    pub config_target: PathBuf,
    /// Template for the base stylesheet.
    pub css_template: PathBuf,
    /// Where the rendered stylesheet goes.
    pub css_target: PathBuf,
    /// Where custom theme CSS files are written, if anywhere.
    pub theme_css_dir: Option<PathBuf>,
    /// Directories scanned for HTML and searched for templates.
    pub template_dirs: Vec<PathBuf>,
    /// Extra stylesheets imported by the base stylesheet.
    pub css_files: Vec<PathBuf>,
    /// daisyUI theme list.
    pub themes: Vec<Theme>,
    /// Tailwind theme options spread over the generated theme section.
    pub theme_override: Map<String, Value>,
}

impl ProjectConfig {
    /// Default configuration rooted at `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            config_template: PathBuf::from(DEFAULT_CONFIG_TEMPLATE),
            config_target: base_dir.join(DEFAULT_CONFIG_TARGET),
            css_template: PathBuf::from(DEFAULT_CSS_TEMPLATE),
            css_target: base_dir.join(DEFAULT_CSS_TARGET),
            theme_css_dir: None,
            template_dirs: vec![base_dir.join(DEFAULT_TEMPLATE_DIR)],
            css_files: Vec::new(),
            themes: default_themes(),
            theme_override: Map::new(),
            base_dir,
        }
    }

    /// Load a project file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = parse_project(&content, &parent_dir(path))?;
        info!(path = %path.display(), themes = config.themes.len(), "loaded project");
        Ok(config)
    }

    /// Load a project file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "no project file, using defaults");
            Ok(Self::with_base_dir(parent_dir(path)))
        }
    }

    /// Apply `DAISYUI_THEMES` and `TAILWIND_THEME_OVERRIDE`.
    ///
    /// Values with the wrong shape are logged and leave the configuration
    /// as it was.
    pub fn apply_env(&mut self, env: &EnvSource) {
        if let Some(value) = env.json(DAISYUI_THEMES) {
            match Theme::parse_list(&value) {
                Ok(themes) => {
                    debug!(count = themes.len(), "themes from environment");
                    self.themes = themes;
                }
                Err(e) => warn!(variable = DAISYUI_THEMES, error = %e, "ignoring theme override"),
            }
        }

        if let Some(value) = env.json(TAILWIND_THEME_OVERRIDE) {
            match value {
                Value::Object(map) => {
                    debug!(keys = map.len(), "theme override from environment");
                    self.theme_override = map;
                }
                _ => warn!(
                    variable = TAILWIND_THEME_OVERRIDE,
                    "ignoring theme override that is not an object"
                ),
            }
        }
    }

    /// Locate a template.
    ///
    /// Absolute paths and paths relative to the project directory win; after
    /// that each template directory is searched in order.
    pub fn resolve_template(&self, template: &Path) -> Option<PathBuf> {
        if template.is_absolute() {
            return template.is_file().then(|| template.to_path_buf());
        }

        std::iter::once(&self.base_dir)
            .chain(self.template_dirs.iter())
            .map(|dir| dir.join(template))
            .find(|candidate| candidate.is_file())
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf()
}

/// Parse a project configuration from KDL text.
pub fn parse_project(kdl: &str, base_dir: &Path) -> ConfigResult<ProjectConfig> {
    let doc: KdlDocument = kdl.parse()?;
    let mut config = ProjectConfig::with_base_dir(base_dir);

    for node in doc.nodes() {
        match node.name().value() {
            "config-template" => {
                config.config_template = PathBuf::from(required_string(node)?);
            }
            "config-target" => {
                config.config_target = base_dir.join(required_string(node)?);
            }
            "css-template" => {
                config.css_template = PathBuf::from(required_string(node)?);
            }
            "css-target" => {
                config.css_target = base_dir.join(required_string(node)?);
            }
            "theme-css-dir" => {
                config.theme_css_dir = Some(base_dir.join(required_string(node)?));
            }
            "template-dirs" => {
                config.template_dirs = get_all_string_args(node)
                    .into_iter()
                    .map(|d| base_dir.join(d))
                    .collect();
            }
            "css-files" => {
                config.css_files = get_all_string_args(node)
                    .into_iter()
                    .map(|f| base_dir.join(f))
                    .collect();
            }
            "theme-override" => {
                config.theme_override = parse_theme_override(&required_string(node)?)?;
            }
            "themes" => {
                config.themes = parse_themes(node)?;
            }
            other => {
                debug!(node = other, "ignoring unknown project node");
            }
        }
    }

    Ok(config)
}

fn parse_theme_override(raw: &str) -> ConfigResult<Map<String, Value>> {
    match serde_json::from_str(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::InvalidValue {
            field: "theme-override".to_string(),
            message: format!("expected a JSON object, got {}", other),
        }),
    }
}

fn parse_themes(node: &KdlNode) -> ConfigResult<Vec<Theme>> {
    let mut themes = Vec::new();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            if child.name().value() != "theme" {
                return Err(ConfigError::InvalidValue {
                    field: "themes".to_string(),
                    message: format!("unexpected node '{}'", child.name().value()),
                });
            }
            themes.push(parse_theme(child)?);
        }
    }

    check_unique(&themes)?;
    Ok(themes)
}

fn parse_theme(node: &KdlNode) -> ConfigResult<Theme> {
    let name = get_first_string_arg(node)
        .ok_or_else(|| ConfigError::MissingField("theme name".to_string()))?;

    // A block, even an empty one, makes it a custom theme
    let Some(children) = node.children() else {
        return Ok(Theme::Builtin(name));
    };

    let mut properties = Vec::new();
    for child in children.nodes() {
        let key = child.name().value().to_string();
        let value = get_first_arg(child).ok_or_else(|| {
            ConfigError::MissingField(format!("value for '{}' in theme '{}'", key, name))
        })?;
        properties.push((key, value));
    }

    Ok(Theme::Custom { name, properties })
}

// Helper functions for extracting values from KDL nodes

fn required_string(node: &KdlNode) -> ConfigResult<String> {
    get_first_string_arg(node)
        .ok_or_else(|| ConfigError::MissingField(format!("value for '{}'", node.name().value())))
}

fn get_first_string_arg(node: &KdlNode) -> Option<String> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

fn get_first_arg(node: &KdlNode) -> Option<Value> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| value_to_json(e.value()))
}

fn get_all_string_args(node: &KdlNode) -> Vec<String> {
    node.entries()
        .iter()
        .filter(|e| e.name().is_none())
        .filter_map(|e| e.value().as_string())
        .map(|s| s.to_string())
        .collect()
}

fn value_to_json(value: &KdlValue) -> Option<Value> {
    match value {
        KdlValue::String(s) => Some(Value::String(s.clone())),
        KdlValue::Integer(i) => i64::try_from(*i)
            .map(Value::from)
            .or_else(|_| u64::try_from(*i).map(Value::from))
            .ok(),
        KdlValue::Float(f) => serde_json::Number::from_f64(*f).map(Value::Number),
        KdlValue::Bool(b) => Some(Value::Bool(*b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = parse_project("", Path::new("/srv/app")).unwrap();

        assert_eq!(config.config_template, PathBuf::from(DEFAULT_CONFIG_TEMPLATE));
        assert_eq!(
            config.config_target,
            PathBuf::from("/srv/app/src/argus/htmx/tailwindtheme/tailwind.config.js")
        );
        assert_eq!(config.template_dirs, vec![PathBuf::from("/srv/app/templates")]);
        assert_eq!(config.themes, default_themes());
        assert!(config.theme_override.is_empty());
        assert!(config.theme_css_dir.is_none());
    }

    #[test]
    fn test_parse_full_project() {
        let kdl = r##"
            config-template "tailwind/tailwind.config.js"
            config-target "out/tailwind.config.js"
            css-target "out/styles.css"
            theme-css-dir "out/themes"
            template-dirs "templates" "app/templates"
            css-files "static/extra.css"
            theme-override "{\"colors\": {\"brand\": \"#ff0000\"}}"

            themes {
                theme "dark"
                theme "argus" {
                    color-scheme "light"
                    primary "#006d91"
                    "--radius-box" "0.5rem"
                    depth 1
                }
            }
        "##;

        let config = parse_project(kdl, Path::new("/srv/app")).unwrap();

        assert_eq!(config.config_target, PathBuf::from("/srv/app/out/tailwind.config.js"));
        assert_eq!(config.css_target, PathBuf::from("/srv/app/out/styles.css"));
        assert_eq!(config.theme_css_dir, Some(PathBuf::from("/srv/app/out/themes")));
        assert_eq!(
            config.template_dirs,
            vec![
                PathBuf::from("/srv/app/templates"),
                PathBuf::from("/srv/app/app/templates")
            ]
        );
        assert_eq!(config.css_files, vec![PathBuf::from("/srv/app/static/extra.css")]);
        assert_eq!(
            Value::Object(config.theme_override.clone()),
            json!({"colors": {"brand": "#ff0000"}})
        );
        assert_eq!(
            config.themes,
            vec![
                Theme::builtin("dark"),
                Theme::custom(
                    "argus",
                    vec![
                        ("color-scheme".to_string(), json!("light")),
                        ("primary".to_string(), json!("#006d91")),
                        ("--radius-box".to_string(), json!("0.5rem")),
                        ("depth".to_string(), json!(1)),
                    ]
                ),
            ]
        );
    }

    #[test]
    fn test_empty_block_is_custom_theme() {
        let config = parse_project("themes {\n  theme \"mytheme\" {}\n}", Path::new(".")).unwrap();
        assert_eq!(config.themes, vec![Theme::custom("mytheme", vec![])]);
    }

    #[test]
    fn test_theme_property_types_kept() {
        let kdl = r#"
            themes {
                theme "corp" {
                    default #true
                    depth 1
                    noise 0.5
                    primary "blue"
                }
            }
        "#;
        let config = parse_project(kdl, Path::new(".")).unwrap();
        assert_eq!(
            crate::theme::themes_to_value(&config.themes),
            json!([{"corp": {"default": true, "depth": 1, "noise": 0.5, "primary": "blue"}}])
        );
    }

    #[test]
    fn test_null_theme_property_rejected() {
        let kdl = "themes {\n  theme \"corp\" {\n    depth #null\n  }\n}";
        let result = parse_project(kdl, Path::new("."));
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_empty_themes_block() {
        let config = parse_project("themes {}", Path::new(".")).unwrap();
        assert!(config.themes.is_empty());
    }

    #[test]
    fn test_theme_override_must_be_object() {
        let result = parse_project(r#"theme-override "[1, 2]""#, Path::new("."));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_theme_override_invalid_json() {
        let result = parse_project(r#"theme-override "{nope""#, Path::new("."));
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_duplicate_theme() {
        let kdl = r#"
            themes {
                theme "light"
                theme "light"
            }
        "#;
        let result = parse_project(kdl, Path::new("."));
        assert!(matches!(result, Err(ConfigError::Duplicate(_))));
    }

    #[test]
    fn test_theme_without_name() {
        let result = parse_project("themes {\n  theme\n}", Path::new("."));
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_missing_path_value() {
        let result = parse_project("config-target", Path::new("."));
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_kdl_syntax_error() {
        let result = parse_project("themes {", Path::new("."));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides_replace_config() {
        let mut config = ProjectConfig::with_base_dir(".");
        let env = EnvSource::new()
            .with(DAISYUI_THEMES, r#"["light", {"corp": {"primary": "blue"}}]"#)
            .with(TAILWIND_THEME_OVERRIDE, r#"{"fontFamily": {}}"#);

        config.apply_env(&env);

        assert_eq!(
            config.themes,
            vec![
                Theme::builtin("light"),
                Theme::custom("corp", vec![("primary".to_string(), json!("blue"))]),
            ]
        );
        assert_eq!(Value::Object(config.theme_override), json!({"fontFamily": {}}));
    }

    #[test]
    fn test_bad_env_values_keep_config() {
        let mut config = ProjectConfig::with_base_dir(".");
        let env = EnvSource::new()
            .with(DAISYUI_THEMES, r#""dark""#)
            .with(TAILWIND_THEME_OVERRIDE, "[1]");

        config.apply_env(&env);

        assert_eq!(config.themes, default_themes());
        assert!(config.theme_override.is_empty());
    }

    #[test]
    fn test_load_and_resolve_template() {
        let dir = tempfile::tempdir().unwrap();
        let templates = dir.path().join("templates/tailwind");
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(templates.join("tailwind.config.js"), "{{ daisyuithemes }}").unwrap();

        let project_file = dir.path().join(DEFAULT_PROJECT_FILE);
        std::fs::write(&project_file, "themes {\n  theme \"light\"\n}\n").unwrap();

        let config = ProjectConfig::load(&project_file).unwrap();
        assert_eq!(config.base_dir, dir.path());

        let resolved = config.resolve_template(&config.config_template).unwrap();
        assert_eq!(resolved, templates.join("tailwind.config.js"));
        assert!(config.resolve_template(&config.css_template).is_none());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::load_or_default(dir.path().join(DEFAULT_PROJECT_FILE)).unwrap();
        assert_eq!(config.base_dir, dir.path());
        assert_eq!(config.themes, default_themes());
    }
}
