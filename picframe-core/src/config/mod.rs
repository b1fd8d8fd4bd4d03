//! Configuration types and loading
//!
//! Board-agnostic configuration structures plus a minimal TOML loader.

pub mod toml;
pub mod types;

pub use toml::parse_config;
pub use types::*;
