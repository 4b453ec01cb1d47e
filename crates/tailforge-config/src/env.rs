//! Environment overrides.
//!
//! Supported variables:
//! - `DAISYUI_THEMES` - JSON theme list, replaces the configured themes
//! - `TAILWIND_THEME_OVERRIDE` - JSON object, replaces the theme override
//!
//! Values that are not valid JSON are logged and ignored.

use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

pub const DAISYUI_THEMES: &str = "DAISYUI_THEMES";
pub const TAILWIND_THEME_OVERRIDE: &str = "TAILWIND_THEME_OVERRIDE";

/// A snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the override variables from the current process environment.
    pub fn from_process() -> Self {
        let mut source = Self::new();
        for name in [DAISYUI_THEMES, TAILWIND_THEME_OVERRIDE] {
            if let Ok(value) = std::env::var(name) {
                source.set(name, value);
            }
        }
        source
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|s| s.as_str())
    }

    /// Read a variable as JSON. Unset, empty or invalid values give `None`.
    pub fn json(&self, name: &str) -> Option<Value> {
        let raw = self.get(name)?.trim();
        if raw.is_empty() {
            return None;
        }

        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(variable = name, error = %e, "ignoring environment variable with invalid JSON");
                None
            }
        }
    }
}
