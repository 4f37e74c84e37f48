//! Clock and reset connection points.

use std::fmt;

use hwif_common::{Dump, Dumper, Frequency, RawValue};
use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// Declaration of a clock input.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ClockDecl {
    /// The clock name.
    pub name: String,
    /// Nominal rate: an integer in Hz or a string such as `"50MHz"`. Absent means unspecified.
    #[serde(default)]
    pub rate: Option<RawValue>,
}

impl ClockDecl {
    /// Declares a clock with an unspecified rate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rate: None,
        }
    }

    /// Sets the nominal rate.
    pub fn with_rate(mut self, rate: impl Into<RawValue>) -> Self {
        self.rate = Some(rate.into());
        self
    }
}

/// Declaration of a reset input.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ResetDecl {
    /// The reset name.
    pub name: String,
    /// The associated clock.
    pub clock: String,
    /// Optional synchronous-edge policy: `DEASSERT`, `BOTH` or `NONE`.
    #[serde(default)]
    pub edges: Option<String>,
}

impl ResetDecl {
    /// Declares a reset associated with `clock`.
    pub fn new(name: impl Into<String>, clock: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clock: clock.into(),
            edges: None,
        }
    }

    /// Sets the synchronous-edge policy.
    pub fn with_edges(mut self, edges: impl Into<String>) -> Self {
        self.edges = Some(edges.into());
        self
    }
}

/// Declaration of a clock together with its reset.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ClockResetDecl {
    /// The clock name.
    pub clock: String,
    /// Nominal clock rate.
    #[serde(default)]
    pub rate: Option<RawValue>,
    /// The reset name.
    pub reset: String,
    /// Optional synchronous-edge policy of the reset.
    #[serde(default)]
    pub edges: Option<String>,
}

impl ClockResetDecl {
    /// Splits into the clock and reset declarations it stands for.
    pub fn split(&self) -> (ClockDecl, ResetDecl) {
        (
            ClockDecl {
                name: self.clock.clone(),
                rate: self.rate.clone(),
            },
            ResetDecl {
                name: self.reset.clone(),
                clock: self.clock.clone(),
                edges: self.edges.clone(),
            },
        )
    }
}

/// A resolved clock input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Clock {
    /// The clock name.
    pub name: String,
    /// Nominal rate; zero means unspecified.
    pub rate: Frequency,
}

impl Clock {
    /// Resolves a clock declaration.
    pub fn resolve(decl: &ClockDecl) -> Result<Self, PortError> {
        let invalid = |raw: &RawValue| PortError::InvalidClockRate {
            point: decl.name.clone(),
            value: raw.to_string(),
        };
        let rate = match &decl.rate {
            None => Frequency::UNSPECIFIED,
            Some(RawValue::Int(hz)) => Frequency::from_hz(*hz),
            Some(raw @ RawValue::Str(s)) => s.parse().map_err(|_| invalid(raw))?,
            Some(raw @ RawValue::Bool(_)) => return Err(invalid(raw)),
        };
        Ok(Self {
            name: decl.name.clone(),
            rate,
        })
    }
}

impl Dump for Clock {
    fn dump(&self, out: &mut Dumper) {
        if self.rate.is_unspecified() {
            out.line(format_args!("Connection Point Clock: {} : unspecified rate", self.name));
        } else {
            out.line(format_args!("Connection Point Clock: {} : {}", self.name, self.rate));
        }
    }
}

/// Which reset edges are synchronous to the associated clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SynchronousEdges {
    /// Only deassertion is synchronous.
    Deassert,
    /// Assertion and deassertion are synchronous.
    Both,
    /// The reset is fully asynchronous.
    None,
}

impl SynchronousEdges {
    /// Looks up a policy by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "DEASSERT" => Some(SynchronousEdges::Deassert),
            "BOTH" => Some(SynchronousEdges::Both),
            "NONE" => Some(SynchronousEdges::None),
            _ => None,
        }
    }
}

impl fmt::Display for SynchronousEdges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SynchronousEdges::Deassert => "DEASSERT",
            SynchronousEdges::Both => "BOTH",
            SynchronousEdges::None => "NONE",
        })
    }
}

/// A resolved reset input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reset {
    /// The reset name.
    pub name: String,
    /// The associated clock.
    pub clock: String,
    /// The synchronous-edge policy, if declared.
    pub edges: Option<SynchronousEdges>,
}

impl Reset {
    /// Resolves a reset declaration.
    pub fn resolve(decl: &ResetDecl) -> Result<Self, PortError> {
        let edges = decl
            .edges
            .as_deref()
            .map(|e| {
                SynchronousEdges::from_name(e).ok_or_else(|| PortError::InvalidResetEdges {
                    point: decl.name.clone(),
                    value: e.to_string(),
                })
            })
            .transpose()?;
        Ok(Self {
            name: decl.name.clone(),
            clock: decl.clock.clone(),
            edges,
        })
    }
}

impl Dump for Reset {
    fn dump(&self, out: &mut Dumper) {
        let edges = self
            .edges
            .map_or_else(|| "unspecified".to_string(), |e| e.to_string());
        out.line(format_args!(
            "Connection Point Reset: {}, associated clock: {}, edges: {edges}",
            self.name, self.clock
        ));
    }
}
