//! daisyUI themes.
//!
//! A theme list mixes built-in theme names with custom themes:
//!
//! ```json
//! ["dark", "light", {"argus": {"color-scheme": "light", "primary": "#006d91"}}]
//! ```
//!
//! Custom themes can also be written out as daisyUI 5 `@plugin` blocks.

use crate::{ConfigError, ConfigResult};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A theme entry in the daisyUI theme list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Theme {
    /// A theme shipped with daisyUI, referenced by name.
    Builtin(String),
    /// A theme defined by its properties, in declaration order.
    Custom {
        name: String,
        properties: Vec<(String, Value)>,
    },
}

impl Theme {
    pub fn builtin(name: impl Into<String>) -> Self {
        Theme::Builtin(name.into())
    }

    pub fn custom(name: impl Into<String>, properties: Vec<(String, Value)>) -> Self {
        Theme::Custom {
            name: name.into(),
            properties,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Theme::Builtin(name) => name,
            Theme::Custom { name, .. } => name,
        }
    }

    /// The theme as an element of the daisyUI `themes` list.
    pub fn to_value(&self) -> Value {
        match self {
            Theme::Builtin(name) => Value::String(name.clone()),
            Theme::Custom { name, properties } => {
                let props: Map<String, Value> = properties.iter().cloned().collect();
                let mut entry = Map::new();
                entry.insert(name.clone(), Value::Object(props));
                Value::Object(entry)
            }
        }
    }

    /// Parse a JSON theme list.
    ///
    /// Strings are built-in themes. Each key of an object is a custom theme,
    /// so `{}` contributes nothing.
    pub fn parse_list(value: &Value) -> ConfigResult<Vec<Theme>> {
        let items = value.as_array().ok_or_else(|| ConfigError::InvalidValue {
            field: "themes".to_string(),
            message: "expected a list".to_string(),
        })?;

        let mut themes = Vec::new();
        for item in items {
            match item {
                Value::String(name) => themes.push(Theme::builtin(name.as_str())),
                Value::Object(entries) => {
                    for (name, props) in entries {
                        themes.push(parse_custom(name, props)?);
                    }
                }
                other => {
                    return Err(ConfigError::InvalidValue {
                        field: "themes".to_string(),
                        message: format!("expected a theme name or object, got {}", other),
                    });
                }
            }
        }

        check_unique(&themes)?;
        Ok(themes)
    }
}

fn parse_custom(name: &str, props: &Value) -> ConfigResult<Theme> {
    let entries = props.as_object().ok_or_else(|| ConfigError::InvalidValue {
        field: format!("theme '{}'", name),
        message: "expected an object of properties".to_string(),
    })?;

    let properties = entries
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(Theme::custom(name, properties))
}

/// The default theme list.
pub fn default_themes() -> Vec<Theme> {
    ["dark", "light", "argus"]
        .into_iter()
        .map(Theme::builtin)
        .collect()
}

/// Fail if two themes share a name.
pub fn check_unique(themes: &[Theme]) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for theme in themes {
        if !seen.insert(theme.name()) {
            return Err(ConfigError::Duplicate(format!("theme '{}'", theme.name())));
        }
    }
    Ok(())
}

/// Theme names in list order.
pub fn theme_names(themes: &[Theme]) -> Vec<&str> {
    themes.iter().map(|t| t.name()).collect()
}

/// The theme list as a JSON array.
pub fn themes_to_value(themes: &[Theme]) -> Value {
    Value::Array(themes.iter().map(Theme::to_value).collect())
}

/// Generate a daisyUI 5 theme block.
///
/// CSS variables (`--name`) are written bare, every other property is a
/// quoted CSS string. Non-string values are written as JSON text.
pub fn theme_css(name: &str, properties: &[(String, Value)]) -> ConfigResult<String> {
    let mut css = String::from("@plugin \"daisyui/theme\" {\n");
    css.push_str(&format!("  name: {};\n", quote_css(name)));

    for (key, value) in properties {
        css.push_str(&format!("  {}: {};\n", key, css_value(name, key, value)?));
    }

    css.push_str("}\n");
    Ok(css)
}

fn css_value(theme: &str, key: &str, value: &Value) -> ConfigResult<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let invalid = |message: String| ConfigError::InvalidValue {
        field: format!("property '{}' of theme '{}'", key, theme),
        message,
    };

    let bad_key_char = |c: char| c.is_whitespace() || ":;{}\"'\\".contains(c);
    if key.is_empty() || key.contains(bad_key_char) {
        return Err(invalid("not a usable CSS property name".to_string()));
    }

    if key.starts_with("--") {
        // Bare values end at the first ';' or brace
        if text.contains([';', '{', '}', '\n']) {
            return Err(invalid(format!("'{}' cannot be written as a bare CSS value", text)));
        }
        Ok(text)
    } else {
        Ok(quote_css(&text))
    }
}

// CSS string literal with '"' and '\' escaped
fn quote_css(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\a "),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Paths `write_theme_files` writes to, in theme order.
pub fn theme_file_paths(themes: &[Theme], dir: &Path) -> ConfigResult<Vec<PathBuf>> {
    themes
        .iter()
        .filter_map(|theme| match theme {
            Theme::Custom { name, properties } => {
                Some(theme_file_path(name, properties, dir))
            }
            Theme::Builtin(_) => None,
        })
        .collect()
}

// Also checks that every property can be written as CSS
fn theme_file_path(
    name: &str,
    properties: &[(String, Value)],
    dir: &Path,
) -> ConfigResult<PathBuf> {
    for (key, value) in properties {
        css_value(name, key, value)?;
    }
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(ConfigError::InvalidValue {
            field: "theme name".to_string(),
            message: format!("'{}' cannot be used as a file name", name),
        });
    }
    Ok(dir.join(format!("{}.css", name)))
}

/// Write `<name>.css` into `dir` for every custom theme.
///
/// Returns the written paths in theme order.
pub fn write_theme_files(themes: &[Theme], dir: &Path) -> ConfigResult<Vec<PathBuf>> {
    let mut written = Vec::new();

    for theme in themes {
        let Theme::Custom { name, properties } = theme else {
            continue;
        };

        let path = theme_file_path(name, properties, dir)?;
        if written.is_empty() {
            std::fs::create_dir_all(dir)?;
        }

        std::fs::write(&path, theme_css(name, properties)?)?;
        debug!(theme = %name, path = %path.display(), "wrote theme css");
        written.push(path);
    }

    Ok(written)
}
