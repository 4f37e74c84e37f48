//! Connection-point resolution for hardware interface descriptions.
//!
//! A connection point is one named external interface of a module: a clock,
//! a reset, a streaming sink or source, a memory-mapped slave or master, or a
//! conduit of loose signals. Declarations are resolved against a
//! [`ParameterTable`](hwif_params::ParameterTable) into records with concrete
//! widths and derived signal names. Every field read from a parameter keeps
//! the parameter's name, so [`ConnectionPoints::refresh`] can repeat the same
//! computation after the host changes a value.

#![warn(missing_docs)]

pub mod binding;
pub mod clock;
pub mod conduit;
pub mod decl;
pub mod error;
pub mod memory_mapped;
pub mod point;
pub mod registry;
pub mod resolve;
pub mod signal;
pub mod stream;

pub use binding::DeferredBinding;
pub use clock::{Clock, ClockDecl, ClockResetDecl, Reset, ResetDecl, SynchronousEdges};
pub use conduit::{Conduit, ConduitDecl, ConduitSignal, ConduitSignalDecl};
pub use decl::{ConnectionPointDecl, ConnectionPointKind};
pub use error::PortError;
pub use memory_mapped::{
    Address, AddressDecl, Burst, BurstDecl, MemoryMappedDecl, MemoryMappedPort, MemoryMappedRole,
    ReadDecl, ReadPort, WriteDecl, WritePort,
};
pub use point::ConnectionPoint;
pub use registry::ConnectionPoints;
pub use resolve::{Resolved, Resolver};
pub use signal::{SignalDirection, SizedSignal};
pub use stream::{
    Channel, ChannelDecl, ErrorDecl, ErrorSignal, Handshake, HandshakeMode, PacketDecl, Packets,
    StreamDataDecl, StreamDecl, StreamDirection, StreamEndpoint,
};
