//! Error types for description loading and resolution.

use hwif_common::HashError;
use hwif_params::ParamError;
use hwif_ports::PortError;

/// Errors that can occur when loading or resolving an `interface.toml` description.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the description file.
    #[error("failed to read description: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse description: {0}")]
    ParseError(String),

    /// A required field is missing from the description.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Building or updating the parameter table failed.
    #[error("parameter error: {0}")]
    Parameter(#[from] ParamError),

    /// Resolving a connection point failed.
    #[error("connection point error: {0}")]
    ConnectionPoint(#[from] PortError),

    /// The resolved model could not be encoded for hashing.
    #[error("failed to fingerprint resolved interface: {0}")]
    Fingerprint(#[from] HashError),
}
