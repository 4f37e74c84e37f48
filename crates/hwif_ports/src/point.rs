//! The resolved connection point, one variant per record shape.

use hwif_common::{Dump, Dumper};
use hwif_params::ParameterTable;
use serde::Serialize;

use crate::clock::{Clock, Reset};
use crate::conduit::Conduit;
use crate::decl::ConnectionPointKind;
use crate::error::PortError;
use crate::memory_mapped::{MemoryMappedPort, MemoryMappedRole};
use crate::stream::{StreamDirection, StreamEndpoint};

/// A resolved connection point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ConnectionPoint {
    /// A clock input.
    Clock(Clock),
    /// A reset input.
    Reset(Reset),
    /// A streaming sink or source.
    Stream(StreamEndpoint),
    /// A memory-mapped slave or master.
    MemoryMapped(MemoryMappedPort),
    /// A conduit.
    Conduit(Conduit),
}

impl ConnectionPoint {
    /// The connection point name.
    pub fn name(&self) -> &str {
        match self {
            ConnectionPoint::Clock(c) => &c.name,
            ConnectionPoint::Reset(r) => &r.name,
            ConnectionPoint::Stream(s) => &s.name,
            ConnectionPoint::MemoryMapped(m) => &m.name,
            ConnectionPoint::Conduit(c) => &c.name,
        }
    }

    /// The tag this point would be declared with.
    pub fn kind(&self) -> ConnectionPointKind {
        match self {
            ConnectionPoint::Clock(_) => ConnectionPointKind::Clock,
            ConnectionPoint::Reset(_) => ConnectionPointKind::Reset,
            ConnectionPoint::Stream(s) => match s.direction {
                StreamDirection::Sink => ConnectionPointKind::Sink,
                StreamDirection::Source => ConnectionPointKind::Source,
            },
            ConnectionPoint::MemoryMapped(m) => match m.role {
                MemoryMappedRole::Slave => ConnectionPointKind::MMSlave,
                MemoryMappedRole::Master => ConnectionPointKind::MMMaster,
            },
            ConnectionPoint::Conduit(_) => ConnectionPointKind::Conduit,
        }
    }

    /// The associated clock. A clock has none; a reset names its clock.
    pub fn associated_clock(&self) -> Option<&str> {
        match self {
            ConnectionPoint::Clock(_) => None,
            ConnectionPoint::Reset(r) => Some(&r.clock),
            ConnectionPoint::Stream(s) => Some(&s.clock),
            ConnectionPoint::MemoryMapped(m) => Some(&m.clock),
            ConnectionPoint::Conduit(c) => c.clock.as_deref(),
        }
    }

    /// The associated reset. Clocks and resets have none.
    pub fn associated_reset(&self) -> Option<&str> {
        match self {
            ConnectionPoint::Clock(_) | ConnectionPoint::Reset(_) => None,
            ConnectionPoint::Stream(s) => Some(&s.reset),
            ConnectionPoint::MemoryMapped(m) => Some(&m.reset),
            ConnectionPoint::Conduit(c) => c.reset.as_deref(),
        }
    }

    /// Returns the stream endpoint, if this is one.
    pub fn as_stream(&self) -> Option<&StreamEndpoint> {
        match self {
            ConnectionPoint::Stream(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the memory-mapped port, if this is one.
    pub fn as_memory_mapped(&self) -> Option<&MemoryMappedPort> {
        match self {
            ConnectionPoint::MemoryMapped(m) => Some(m),
            _ => None,
        }
    }

    /// Re-runs resolution against the current table. Clocks and resets carry
    /// no symbolic fields and are returned unchanged.
    pub fn refreshed(&self, params: &ParameterTable) -> Result<Self, PortError> {
        Ok(match self {
            ConnectionPoint::Clock(_) | ConnectionPoint::Reset(_) => self.clone(),
            ConnectionPoint::Stream(s) => ConnectionPoint::Stream(s.refreshed(params)?),
            ConnectionPoint::MemoryMapped(m) => ConnectionPoint::MemoryMapped(m.refreshed(params)?),
            ConnectionPoint::Conduit(c) => ConnectionPoint::Conduit(c.refreshed(params)?),
        })
    }

    /// Every symbolic field as `(field, parameter)`.
    pub fn symbolic_fields(&self) -> Vec<(&str, &str)> {
        match self {
            ConnectionPoint::Clock(_) | ConnectionPoint::Reset(_) => Vec::new(),
            ConnectionPoint::Stream(s) => s.symbolic_fields(),
            ConnectionPoint::MemoryMapped(m) => m.symbolic_fields(),
            ConnectionPoint::Conduit(c) => c.symbolic_fields(),
        }
    }
}

impl Dump for ConnectionPoint {
    fn dump(&self, out: &mut Dumper) {
        match self {
            ConnectionPoint::Clock(c) => c.dump(out),
            ConnectionPoint::Reset(r) => r.dump(out),
            ConnectionPoint::Stream(s) => s.dump(out),
            ConnectionPoint::MemoryMapped(m) => m.dump(out),
            ConnectionPoint::Conduit(c) => c.dump(out),
        }
    }
}
