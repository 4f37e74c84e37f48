//! Loading and resolution of `interface.toml` interface descriptions.
//!
//! This crate reads a component's declarative interface description, decodes
//! each tagged connection-point table into a typed declaration, and resolves
//! the whole description into a [`ResolvedInterface`]: a parameter table plus
//! the connection-point registry built against it.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    decode_connection_point, load_description, load_description_from_str, DESCRIPTION_FILE,
};
pub use resolve::ResolvedInterface;
pub use types::*;
