//! Service configuration.
//!
//! Loaded once at startup from an optional `config` file layered under
//! `WAIFU__*` environment variables.

mod loader;
mod static_config;

pub use loader::load_static_config;
