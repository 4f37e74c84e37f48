//! Error types for connection-point resolution.

use hwif_params::ParamError;

/// Errors raised while resolving a connection-point declaration.
///
/// Every variant names the offending connection point so the caller can
/// report it without further context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// A connection point with this name is already registered.
    #[error("connection point '{0}' already declared")]
    DuplicateName(String),

    /// The declaration tag is not a known connection-point kind.
    #[error("unknown connection point kind '{0}'")]
    UnknownConnectionPointKind(String),

    /// A width-like field is neither a literal, a digit string, nor a usable parameter.
    #[error("{point}: invalid {field} '{value}'")]
    InvalidWidth {
        /// The connection point being resolved.
        point: String,
        /// The descriptor field.
        field: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// A symbolic reference names a parameter that does not exist.
    #[error("{point}: {field} refers to unknown parameter '{name}'")]
    UnresolvedParameter {
        /// The connection point being resolved.
        point: String,
        /// The descriptor field.
        field: &'static str,
        /// The missing parameter name.
        name: String,
    },

    /// The packet descriptor has the wrong shape.
    #[error("{point}: invalid packet descriptor: {reason}")]
    InvalidPacketDescriptor {
        /// The connection point being resolved.
        point: String,
        /// What is wrong with the descriptor.
        reason: String,
    },

    /// The channel descriptor has the wrong shape.
    #[error("{point}: invalid channel descriptor: {reason}")]
    InvalidChannelDescriptor {
        /// The connection point being resolved.
        point: String,
        /// What is wrong with the descriptor.
        reason: String,
    },

    /// The handshake mode is not one of the five known modes.
    #[error("{point}: invalid handshake mode '{mode}'")]
    InvalidHandshakeMode {
        /// The connection point being resolved.
        point: String,
        /// The rejected mode or parameter name.
        mode: String,
    },

    /// The address descriptor is malformed.
    #[error("{point}: invalid address descriptor: {reason}")]
    InvalidAddressDescriptor {
        /// The connection point being resolved.
        point: String,
        /// What is wrong with the descriptor.
        reason: String,
    },

    /// A conduit signal width is neither a literal, a digit string, nor a usable parameter.
    #[error("{point}: signal '{signal}' has invalid width '{value}'")]
    InvalidSignalWidth {
        /// The conduit being resolved.
        point: String,
        /// The signal name.
        signal: String,
        /// The rejected raw width.
        value: String,
    },

    /// A data width is not a whole multiple of its symbol width.
    #[error("{point}: data width {width} is not a multiple of symbol width {symbol_width}")]
    NonIntegralSymbolCount {
        /// The connection point being resolved.
        point: String,
        /// The data width.
        width: u64,
        /// The symbol width.
        symbol_width: u64,
    },

    /// A clock rate is neither an integer nor a frequency string.
    #[error("{point}: invalid clock rate '{value}'")]
    InvalidClockRate {
        /// The clock being resolved.
        point: String,
        /// The rejected rate.
        value: String,
    },

    /// A reset edge policy is not `DEASSERT`, `BOTH` or `NONE`.
    #[error("{point}: invalid synchronous edges '{value}'")]
    InvalidResetEdges {
        /// The reset being resolved.
        point: String,
        /// The rejected policy.
        value: String,
    },

    /// A conduit signal direction is not `Input`, `Output` or `Bidir`.
    #[error("{point}: signal '{signal}' has invalid direction '{value}'")]
    InvalidSignalDirection {
        /// The conduit being resolved.
        point: String,
        /// The signal name.
        signal: String,
        /// The rejected direction.
        value: String,
    },

    /// A parameter table operation failed.
    #[error(transparent)]
    Param(#[from] ParamError),
}
