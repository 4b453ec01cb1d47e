//! Template materializer for tailforge.
//!
//! This crate contains:
//! - Template parsing for `{{ name }}` placeholder tokens
//! - Substitution maps and value literal rendering
//! - The `render` operation and its error type

pub mod error;
pub mod template;
pub mod value;

pub use error::{Error, Result};
pub use template::{Placeholder, RenderedDocument, Template, render};
pub use value::{
    Substitutions, SubstitutionsBuilder, is_valid_name, parse_assignment, to_literal,
    to_pretty_literal,
};
