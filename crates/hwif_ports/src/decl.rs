//! Tagged connection-point declarations.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::clock::{ClockDecl, ClockResetDecl, ResetDecl};
use crate::conduit::ConduitDecl;
use crate::error::PortError;
use crate::memory_mapped::MemoryMappedDecl;
use crate::stream::StreamDecl;

/// The declaration tag of a connection point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ConnectionPointKind {
    /// A clock input.
    Clock,
    /// A reset input.
    Reset,
    /// A clock and its reset, declared together.
    ClockReset,
    /// A streaming input.
    Sink,
    /// A streaming output.
    Source,
    /// A memory-mapped master.
    MMMaster,
    /// A memory-mapped slave.
    MMSlave,
    /// A bundle of unrelated signals.
    Conduit,
}

impl ConnectionPointKind {
    /// Every tag, in declaration-grammar order.
    pub const ALL: [ConnectionPointKind; 8] = [
        ConnectionPointKind::Clock,
        ConnectionPointKind::Reset,
        ConnectionPointKind::ClockReset,
        ConnectionPointKind::Sink,
        ConnectionPointKind::Source,
        ConnectionPointKind::MMMaster,
        ConnectionPointKind::MMSlave,
        ConnectionPointKind::Conduit,
    ];

    /// The tag as written in declarations.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionPointKind::Clock => "Clock",
            ConnectionPointKind::Reset => "Reset",
            ConnectionPointKind::ClockReset => "ClockReset",
            ConnectionPointKind::Sink => "Sink",
            ConnectionPointKind::Source => "Source",
            ConnectionPointKind::MMMaster => "MMMaster",
            ConnectionPointKind::MMSlave => "MMSlave",
            ConnectionPointKind::Conduit => "Conduit",
        }
    }
}

impl FromStr for ConnectionPointKind {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| PortError::UnknownConnectionPointKind(s.to_string()))
    }
}

impl fmt::Display for ConnectionPointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A connection-point declaration, one variant per tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionPointDecl {
    /// `Clock`
    Clock(ClockDecl),
    /// `Reset`
    Reset(ResetDecl),
    /// `ClockReset`: expands to one clock and one reset.
    ClockReset(ClockResetDecl),
    /// `Sink`
    Sink(StreamDecl),
    /// `Source`
    Source(StreamDecl),
    /// `MMMaster`
    MMMaster(MemoryMappedDecl),
    /// `MMSlave`
    MMSlave(MemoryMappedDecl),
    /// `Conduit`
    Conduit(ConduitDecl),
}

impl ConnectionPointDecl {
    /// The declaration tag.
    pub fn kind(&self) -> ConnectionPointKind {
        match self {
            ConnectionPointDecl::Clock(_) => ConnectionPointKind::Clock,
            ConnectionPointDecl::Reset(_) => ConnectionPointKind::Reset,
            ConnectionPointDecl::ClockReset(_) => ConnectionPointKind::ClockReset,
            ConnectionPointDecl::Sink(_) => ConnectionPointKind::Sink,
            ConnectionPointDecl::Source(_) => ConnectionPointKind::Source,
            ConnectionPointDecl::MMMaster(_) => ConnectionPointKind::MMMaster,
            ConnectionPointDecl::MMSlave(_) => ConnectionPointKind::MMSlave,
            ConnectionPointDecl::Conduit(_) => ConnectionPointKind::Conduit,
        }
    }

    /// The names this declaration registers: two for `ClockReset`, one otherwise.
    pub fn names(&self) -> Vec<&str> {
        match self {
            ConnectionPointDecl::Clock(d) => vec![d.name.as_str()],
            ConnectionPointDecl::Reset(d) => vec![d.name.as_str()],
            ConnectionPointDecl::ClockReset(d) => vec![d.clock.as_str(), d.reset.as_str()],
            ConnectionPointDecl::Sink(d) | ConnectionPointDecl::Source(d) => vec![d.name.as_str()],
            ConnectionPointDecl::MMMaster(d) | ConnectionPointDecl::MMSlave(d) => {
                vec![d.name.as_str()]
            }
            ConnectionPointDecl::Conduit(d) => vec![d.name.as_str()],
        }
    }
}
