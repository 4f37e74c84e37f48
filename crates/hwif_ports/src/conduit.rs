//! Conduits: bundles of named signals that fit no other interface shape.

use hwif_common::{Dump, Dumper, RawValue};
use hwif_params::ParameterTable;
use serde::{Deserialize, Serialize};

use crate::error::PortError;
use crate::resolve::{Resolved, Resolver};
use crate::signal::{or_none, SignalDirection};

/// One signal of a conduit declaration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ConduitSignalDecl {
    /// The signal name.
    pub name: String,
    /// `Input`, `Output` or `Bidir`.
    pub direction: String,
    /// Width: literal, digit string, or parameter name.
    pub width: RawValue,
}

impl ConduitSignalDecl {
    /// Declares a conduit signal.
    pub fn new(
        name: impl Into<String>,
        direction: impl Into<String>,
        width: impl Into<RawValue>,
    ) -> Self {
        Self {
            name: name.into(),
            direction: direction.into(),
            width: width.into(),
        }
    }
}

/// Declaration of a conduit.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ConduitDecl {
    /// The connection point name.
    pub name: String,
    /// The associated clock, if any.
    #[serde(default)]
    pub clock: Option<String>,
    /// The associated reset, if any.
    #[serde(default)]
    pub reset: Option<String>,
    /// The signals, in order.
    #[serde(default)]
    pub signals: Vec<ConduitSignalDecl>,
}

impl ConduitDecl {
    /// Declares an empty conduit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clock: None,
            reset: None,
            signals: Vec::new(),
        }
    }

    /// Associates a clock and reset.
    pub fn with_clock_reset(mut self, clock: impl Into<String>, reset: impl Into<String>) -> Self {
        self.clock = Some(clock.into());
        self.reset = Some(reset.into());
        self
    }

    /// Appends a signal.
    pub fn with_signal(mut self, signal: ConduitSignalDecl) -> Self {
        self.signals.push(signal);
        self
    }
}

/// A resolved conduit signal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConduitSignal {
    /// The signal name.
    pub name: String,
    /// The signal direction.
    pub direction: SignalDirection,
    /// The signal width.
    pub width: Resolved<u64>,
}

/// A resolved conduit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Conduit {
    /// The connection point name.
    pub name: String,
    /// The associated clock.
    pub clock: Option<String>,
    /// The associated reset.
    pub reset: Option<String>,
    /// The signals, in declaration order.
    pub signals: Vec<ConduitSignal>,
    #[serde(skip)]
    pub(crate) decl: ConduitDecl,
}

impl Conduit {
    /// Resolves a conduit declaration against the parameter table.
    pub fn resolve(params: &ParameterTable, decl: &ConduitDecl) -> Result<Self, PortError> {
        let r = Resolver::new(params, &decl.name);
        let signals = decl
            .signals
            .iter()
            .map(|s| {
                let direction = SignalDirection::from_name(&s.direction).ok_or_else(|| {
                    PortError::InvalidSignalDirection {
                        point: decl.name.clone(),
                        signal: s.name.clone(),
                        value: s.direction.clone(),
                    }
                })?;
                let width = r
                    .try_natural("signal width", &s.width)?
                    .ok_or_else(|| PortError::InvalidSignalWidth {
                        point: decl.name.clone(),
                        signal: s.name.clone(),
                        value: s.width.to_string(),
                    })?;
                Ok(ConduitSignal {
                    name: s.name.clone(),
                    direction,
                    width,
                })
            })
            .collect::<Result<Vec<_>, PortError>>()?;
        Ok(Self {
            name: decl.name.clone(),
            clock: decl.clock.clone(),
            reset: decl.reset.clone(),
            signals,
            decl: decl.clone(),
        })
    }

    /// Re-runs resolution from the stored declaration.
    pub fn refreshed(&self, params: &ParameterTable) -> Result<Self, PortError> {
        Self::resolve(params, &self.decl)
    }

    /// The declaration this conduit was resolved from.
    pub fn decl(&self) -> &ConduitDecl {
        &self.decl
    }

    /// Every symbolic signal width as `(signal, parameter)`.
    pub fn symbolic_fields(&self) -> Vec<(&str, &str)> {
        self.signals
            .iter()
            .filter_map(|s| s.width.key().map(|k| (s.name.as_str(), k)))
            .collect()
    }
}

impl Dump for Conduit {
    fn dump(&self, out: &mut Dumper) {
        out.line(format_args!("Connection Point Conduit: {}", self.name));
        out.nested(|out| {
            out.line(format_args!(
                "associated clock and reset: {}, {}",
                or_none(&self.clock),
                or_none(&self.reset)
            ));
            for s in &self.signals {
                out.line(format_args!("{} : {} width: {}", s.name, s.direction, s.width));
            }
        });
    }
}
