//! Configuration management for Gerencial

pub mod loader;
mod schema;

pub use loader::{load_config, load_config_from_path, save_config_to_path};
pub use schema::*;
