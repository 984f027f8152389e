//! Configuration loading and types
//!
//! Configuration is assembled with [`figment`](https://docs.rs/figment):
//! `AppConfig::default()` first, a TOML file merged on top if present, then
//! `MCB_`-prefixed environment variables override both. See [`loader`] for
//! the merge order and [`types`] for the schema.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
