//! Substitution maps and literal rendering of values.
//!
//! Values are JSON values. When a value lands in a template it is written
//! as a literal for the consuming tool:
//! - strings are inserted verbatim, without quotes or escaping
//! - everything else is serialized as compact JSON, which is also valid
//!   JavaScript literal syntax (`["dark","light"]`, `{}`, `42`, `true`)

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

// Placeholder names: identifiers only, no dotted access
static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Check whether `name` can be used as a placeholder name.
pub fn is_valid_name(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

/// Values keyed by placeholder name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Substitutions {
    values: Map<String, Value>,
}

impl Substitutions {
    /// Create an empty substitution map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read substitutions from a JSON object.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set the value for a placeholder, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Set a string that is inserted into the template verbatim.
    pub fn insert_raw(&mut self, name: impl Into<String>, text: impl Into<String>) -> Option<Value> {
        self.insert(name, Value::String(text.into()))
    }

    /// Parse and insert a `name=value` assignment.
    pub fn insert_assignment(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = parse_assignment(assignment)?;
        self.values.insert(name, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Placeholder names with a value, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    /// Merge another map into this one. Entries from `other` win.
    pub fn extend(&mut self, other: Substitutions) {
        self.values.extend(other.values);
    }
}

impl FromIterator<(String, Value)> for Substitutions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Parse a `name=value` assignment.
///
/// The value is read as JSON when it parses as JSON and taken as a raw
/// string otherwise, so `themes=["dark"]` yields a list and `dir=src/app`
/// yields the text `src/app`.
pub fn parse_assignment(assignment: &str) -> Result<(String, Value)> {
    let (name, raw) = assignment.split_once('=').ok_or_else(|| {
        Error::InvalidSubstitution(format!("expected name=value, got '{}'", assignment))
    })?;

    let name = name.trim();
    if !is_valid_name(name) {
        return Err(Error::InvalidSubstitution(format!(
            "'{}' is not a valid placeholder name",
            name
        )));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}

/// Render a value as the text that replaces a placeholder.
pub fn to_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a value as multi-line JSON for insertion inside an indented block.
///
/// Every line but the first is prefixed with `indent` spaces; the first line
/// continues wherever the placeholder sits.
pub fn to_pretty_literal(value: &Value, indent: usize) -> String {
    let pretty = match value {
        Value::String(s) => return s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };

    let pad = " ".repeat(indent);
    pretty
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builder for creating Substitutions.
pub struct SubstitutionsBuilder {
    subs: Substitutions,
}

impl SubstitutionsBuilder {
    pub fn new() -> Self {
        Self {
            subs: Substitutions::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.subs.insert(name, value);
        self
    }

    pub fn with_raw(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.subs.insert_raw(name, text);
        self
    }

    pub fn build(self) -> Substitutions {
        self.subs
    }
}

impl Default for SubstitutionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
