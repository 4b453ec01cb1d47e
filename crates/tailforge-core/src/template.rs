//! Placeholder templates.
//!
//! A template is plain text with `{{ name }}` tokens:
//! - `{{ daisyuithemes }}` - replaced by the value named `daisyuithemes`
//! - `{{themeoverride}}` - surrounding spaces inside the braces are optional
//!
//! Tokens cannot nest and cannot span lines. A `}}` outside of a token is
//! ordinary text.

use crate::value::{Substitutions, is_valid_name, to_literal};
use crate::{Error, Result};
use std::fmt;
use std::path::Path;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A placeholder token found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Name looked up in the substitution map.
    pub name: String,
    /// 1-based line of the opening braces.
    pub line: usize,
    /// 1-based column (in characters) of the opening braces.
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A parsed template document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text, rejecting unbalanced or nested delimiters.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut pos = Position::START;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            pos.advance(&rest[..start]);

            let after_open = &rest[start + OPEN.len()..];
            let line_end = after_open.find('\n').unwrap_or(after_open.len());
            let Some(close) = after_open[..line_end].find(CLOSE) else {
                return Err(malformed(pos, "unclosed '{{'".to_string()));
            };

            let body = &after_open[..close];
            if let Some(nested) = body.find(OPEN) {
                let mut at = pos;
                at.advance(&rest[start..start + OPEN.len() + nested]);
                return Err(malformed(at, "nested '{{' inside placeholder".to_string()));
            }

            let name = body.trim_matches(|c| c == ' ' || c == '\t');
            if name.is_empty() {
                return Err(malformed(pos, "empty placeholder".to_string()));
            }
            if !is_valid_name(name) {
                return Err(malformed(pos, format!("invalid placeholder name '{}'", name)));
            }

            segments.push(Segment::Placeholder(Placeholder {
                name: name.to_string(),
                line: pos.line,
                column: pos.column,
            }));

            let consumed = start + OPEN.len() + close + CLOSE.len();
            pos.advance(&rest[start..consumed]);
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Read and parse a template file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// The original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every placeholder occurrence, in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        })
    }

    /// Distinct placeholder names, in order of first occurrence.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for token in self.tokens() {
            if !names.contains(&token.name.as_str()) {
                names.push(&token.name);
            }
        }
        names
    }

    /// Placeholder names that have no value in `substitutions`.
    pub fn missing(&self, substitutions: &Substitutions) -> Vec<&str> {
        self.placeholders()
            .into_iter()
            .filter(|name| !substitutions.contains(name))
            .collect()
    }

    /// Substitute every placeholder.
    ///
    /// Fails on the first placeholder without a value; nothing is returned
    /// in that case.
    pub fn render(&self, substitutions: &Substitutions) -> Result<RenderedDocument> {
        let mut output = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder(token) => {
                    let value = substitutions.get(&token.name).ok_or_else(|| {
                        Error::UnresolvedPlaceholder {
                            name: token.name.clone(),
                            line: token.line,
                            column: token.column,
                        }
                    })?;
                    output.push_str(&to_literal(value));
                }
            }
        }

        Ok(RenderedDocument(output))
    }
}

/// Parse `template` and substitute every placeholder in one step.
pub fn render(template: &str, substitutions: &Substitutions) -> Result<RenderedDocument> {
    Template::parse(template)?.render(substitutions)
}

/// Output of a successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument(String);

impl RenderedDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RenderedDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RenderedDocument> for String {
    fn from(doc: RenderedDocument) -> Self {
        doc.0
    }
}

fn malformed(pos: Position, reason: String) -> Error {
    Error::MalformedTemplate {
        line: pos.line,
        column: pos.column,
        reason,
    }
}

// 1-based line and character column, moved forward as the parser consumes text
#[derive(Debug, Clone, Copy)]
struct Position {
    line: usize,
    column: usize,
}

impl Position {
    const START: Position = Position { line: 1, column: 1 };

    fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}
