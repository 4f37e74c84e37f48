//! The connection-point registry.

use std::collections::HashSet;

use hwif_common::{Dump, Dumper};
use hwif_params::ParameterTable;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::binding::DeferredBinding;
use crate::clock::{Clock, Reset};
use crate::conduit::Conduit;
use crate::decl::ConnectionPointDecl;
use crate::error::PortError;
use crate::memory_mapped::{MemoryMappedPort, MemoryMappedRole};
use crate::point::ConnectionPoint;
use crate::stream::{StreamDirection, StreamEndpoint};

/// Resolved connection points keyed by name, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionPoints {
    points: IndexMap<String, ConnectionPoint>,
}

impl ConnectionPoints {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves declarations in order. The first failure aborts.
    pub fn from_decls(
        params: &ParameterTable,
        decls: impl IntoIterator<Item = ConnectionPointDecl>,
    ) -> Result<Self, PortError> {
        let mut points = Self::new();
        for decl in decls {
            points.insert(params, decl)?;
        }
        Ok(points)
    }

    /// Resolves one declaration and registers the result.
    ///
    /// A `ClockReset` registers a clock and a reset; both names are checked
    /// before either is inserted.
    pub fn insert(
        &mut self,
        params: &ParameterTable,
        decl: ConnectionPointDecl,
    ) -> Result<(), PortError> {
        let names = decl.names();
        for (i, name) in names.iter().enumerate() {
            if self.points.contains_key(*name) || names[..i].contains(name) {
                return Err(PortError::DuplicateName((*name).to_string()));
            }
        }
        let kind = decl.kind();
        let resolved = match &decl {
            ConnectionPointDecl::Clock(d) => vec![ConnectionPoint::Clock(Clock::resolve(d)?)],
            ConnectionPointDecl::Reset(d) => vec![ConnectionPoint::Reset(Reset::resolve(d)?)],
            ConnectionPointDecl::ClockReset(d) => {
                let (clock, reset) = d.split();
                vec![
                    ConnectionPoint::Clock(Clock::resolve(&clock)?),
                    ConnectionPoint::Reset(Reset::resolve(&reset)?),
                ]
            }
            ConnectionPointDecl::Sink(d) => vec![ConnectionPoint::Stream(StreamEndpoint::resolve(
                params,
                StreamDirection::Sink,
                d,
            )?)],
            ConnectionPointDecl::Source(d) => vec![ConnectionPoint::Stream(StreamEndpoint::resolve(
                params,
                StreamDirection::Source,
                d,
            )?)],
            ConnectionPointDecl::MMMaster(d) => vec![ConnectionPoint::MemoryMapped(
                MemoryMappedPort::resolve(params, MemoryMappedRole::Master, d)?,
            )],
            ConnectionPointDecl::MMSlave(d) => vec![ConnectionPoint::MemoryMapped(
                MemoryMappedPort::resolve(params, MemoryMappedRole::Slave, d)?,
            )],
            ConnectionPointDecl::Conduit(d) => {
                vec![ConnectionPoint::Conduit(Conduit::resolve(params, d)?)]
            }
        };
        for point in resolved {
            debug!(name = point.name(), %kind, "connection point added");
            self.points.insert(point.name().to_string(), point);
        }
        Ok(())
    }

    /// Returns the named connection point.
    pub fn get(&self, name: &str) -> Option<&ConnectionPoint> {
        self.points.get(name)
    }

    /// Returns `true` if a connection point with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.points.contains_key(name)
    }

    /// Iterates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ConnectionPoint> {
        self.points.values()
    }

    /// Returns the number of connection points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no connection points are registered.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Width of the empty signal of the named stream endpoint.
    ///
    /// `None` when the name is unknown, is not a stream endpoint, or the
    /// endpoint has no empty signal.
    pub fn width_of_empty_signal(&self, name: &str) -> Option<u32> {
        self.get(name)?.as_stream()?.width_empty()
    }

    /// Width of the channel signal of the named stream endpoint, with the
    /// same `None` cases as [`width_of_empty_signal`](Self::width_of_empty_signal).
    pub fn width_of_channel_signal(&self, name: &str) -> Option<u32> {
        self.get(name)?.as_stream()?.width_channel()
    }

    /// Re-resolves every point from its declaration against the current table.
    ///
    /// Either every point is replaced or, on error, none is.
    pub fn refresh(&mut self, params: &ParameterTable) -> Result<(), PortError> {
        let refreshed = self
            .points
            .iter()
            .map(|(name, point)| Ok((name.clone(), point.refreshed(params)?)))
            .collect::<Result<IndexMap<_, _>, PortError>>()?;
        debug!(points = refreshed.len(), "connection points refreshed");
        self.points = refreshed;
        Ok(())
    }

    /// Lists every symbolic field in declaration order.
    ///
    /// `first_use` marks the first binding of each derived parameter that
    /// has not been consumed yet.
    pub fn bindings(&self, params: &ParameterTable) -> Vec<DeferredBinding> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for point in self.iter() {
            for (field, parameter) in point.symbolic_fields() {
                let (derived, consumed) = params
                    .get(parameter)
                    .map_or((false, false), |p| (p.derived, p.is_consumed()));
                let first_use = derived && !consumed && seen.insert(parameter.to_string());
                out.push(DeferredBinding {
                    point: point.name().to_string(),
                    field: field.to_string(),
                    parameter: parameter.to_string(),
                    derived,
                    first_use,
                });
            }
        }
        out
    }

    /// Refreshes against the current table, then returns the bindings and
    /// marks every derived parameter they read as consumed.
    pub fn elaborate(
        &mut self,
        params: &mut ParameterTable,
    ) -> Result<Vec<DeferredBinding>, PortError> {
        self.refresh(params)?;
        let bindings = self.bindings(params);
        for binding in bindings.iter().filter(|b| b.first_use) {
            params.mark_consumed(&binding.parameter)?;
        }
        debug!(bindings = bindings.len(), "connection points elaborated");
        Ok(bindings)
    }
}

impl Dump for ConnectionPoints {
    fn dump(&self, out: &mut Dumper) {
        out.line("Connection Points");
        out.nested(|out| {
            for point in self.iter() {
                point.dump(out);
            }
        });
    }
}
