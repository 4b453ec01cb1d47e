//! Project configuration for tailforge.
//!
//! This crate handles:
//! - Project files (tailforge.kdl)
//! - daisyUI themes and theme CSS generation
//! - Environment overrides
//! - Building template substitutions
//! - Tailwind CLI release lookup

pub mod context;
pub mod env;
pub mod error;
pub mod project;
pub mod tailwind;
pub mod theme;

pub use context::build_context;
pub use env::EnvSource;
pub use error::{ConfigError, ConfigResult};
pub use project::{ProjectConfig, parse_project};
pub use theme::Theme;
