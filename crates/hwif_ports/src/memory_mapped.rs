//! Memory-mapped slave and master ports.

use std::fmt;

use hwif_common::{bits_for_count, Dump, Dumper, RawValue};
use hwif_params::ParameterTable;
use serde::{Deserialize, Serialize};

use crate::error::PortError;
use crate::resolve::{Resolved, Resolver};
use crate::signal::{or_none, SizedSignal};
use crate::stream::push_key;

const DEFAULT_DATA_WIDTH: u64 = 32;
const DEFAULT_SYMBOL_WIDTH: u64 = 8;
const DEFAULT_READ_WAIT_TIME: u64 = 1;

/// Address signal descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AddressDecl {
    /// The address signal name.
    pub name: String,
    /// The address width.
    pub width: RawValue,
}

impl AddressDecl {
    /// Describes an address signal.
    pub fn new(name: impl Into<String>, width: impl Into<RawValue>) -> Self {
        Self {
            name: name.into(),
            width: width.into(),
        }
    }
}

/// Burst-count signal descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BurstDecl {
    /// The burst-count signal name.
    pub name: String,
    /// The largest burst the port issues or accepts.
    pub max_count: RawValue,
    /// Explicit signal width; computed from `max_count` when absent.
    #[serde(default)]
    pub width: Option<RawValue>,
    /// Bursts never cross a burst-size boundary.
    #[serde(default)]
    pub on_boundaries_only: Option<RawValue>,
    /// Bursts wrap around at line boundaries.
    #[serde(default)]
    pub line_wrap: Option<RawValue>,
}

impl BurstDecl {
    /// Describes a burst-count signal with a computed width.
    pub fn new(name: impl Into<String>, max_count: impl Into<RawValue>) -> Self {
        Self {
            name: name.into(),
            max_count: max_count.into(),
            width: None,
            on_boundaries_only: None,
            line_wrap: None,
        }
    }

    /// Overrides the computed width.
    pub fn with_width(mut self, width: impl Into<RawValue>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Sets the burst-shape flags.
    pub fn with_shape(
        mut self,
        on_boundaries_only: impl Into<RawValue>,
        line_wrap: impl Into<RawValue>,
    ) -> Self {
        self.on_boundaries_only = Some(on_boundaries_only.into());
        self.line_wrap = Some(line_wrap.into());
        self
    }
}

/// Write-side descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WriteDecl {
    /// The write-data signal.
    pub data: String,
    /// The write strobe.
    pub strobe: String,
    /// Symbol width for byte enables; defaults to 8.
    #[serde(default)]
    pub symbol_width: Option<RawValue>,
    /// The byte-enable signal, if any.
    #[serde(default)]
    pub byte_enable: Option<String>,
    /// Write wait time in cycles.
    #[serde(default)]
    pub wait_time: Option<RawValue>,
    /// Hold time in cycles.
    #[serde(default)]
    pub hold_time: Option<RawValue>,
}

impl WriteDecl {
    /// Describes a write side with default timing.
    pub fn new(data: impl Into<String>, strobe: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            strobe: strobe.into(),
            symbol_width: None,
            byte_enable: None,
            wait_time: None,
            hold_time: None,
        }
    }

    /// Adds a byte-enable signal with the given symbol width.
    pub fn with_byte_enable(
        mut self,
        name: impl Into<String>,
        symbol_width: impl Into<RawValue>,
    ) -> Self {
        self.byte_enable = Some(name.into());
        self.symbol_width = Some(symbol_width.into());
        self
    }

    /// Sets the write wait and hold times.
    pub fn with_timing(
        mut self,
        wait_time: impl Into<RawValue>,
        hold_time: impl Into<RawValue>,
    ) -> Self {
        self.wait_time = Some(wait_time.into());
        self.hold_time = Some(hold_time.into());
        self
    }
}

/// Read-side descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ReadDecl {
    /// The read strobe.
    pub strobe: String,
    /// The read-data signal.
    pub data: String,
    /// Maximum outstanding read transactions.
    #[serde(default)]
    pub max_pending: Option<RawValue>,
    /// Read wait time in cycles; defaults to 1.
    #[serde(default)]
    pub wait_time: Option<RawValue>,
    /// Read latency in cycles.
    #[serde(default)]
    pub latency: Option<RawValue>,
}

impl ReadDecl {
    /// Describes a read side with default timing.
    pub fn new(strobe: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            strobe: strobe.into(),
            data: data.into(),
            max_pending: None,
            wait_time: None,
            latency: None,
        }
    }

    /// Sets the pipelining and timing fields.
    pub fn with_timing(
        mut self,
        max_pending: impl Into<RawValue>,
        wait_time: impl Into<RawValue>,
        latency: impl Into<RawValue>,
    ) -> Self {
        self.max_pending = Some(max_pending.into());
        self.wait_time = Some(wait_time.into());
        self.latency = Some(latency.into());
        self
    }
}

/// Declaration of a memory-mapped port.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MemoryMappedDecl {
    /// The connection point name.
    pub name: String,
    /// The associated clock.
    pub clock: String,
    /// The associated reset.
    pub reset: String,
    /// The address signal; a port without one addresses a single word.
    #[serde(default)]
    pub address: Option<AddressDecl>,
    /// The burst-count signal.
    #[serde(default)]
    pub burst: Option<BurstDecl>,
    /// Data width; defaults to 32.
    #[serde(default)]
    pub data_width: Option<RawValue>,
    /// The write side.
    #[serde(default)]
    pub write: Option<WriteDecl>,
    /// The read side.
    #[serde(default)]
    pub read: Option<ReadDecl>,
    /// The wait-request signal.
    #[serde(default)]
    pub wait_request: Option<String>,
    /// The read-data-valid signal.
    #[serde(default)]
    pub read_data_valid: Option<String>,
    /// Setup time in cycles.
    #[serde(default)]
    pub setup_time: Option<RawValue>,
    /// Whether a slave bridges to a master; ignored on masters.
    #[serde(default)]
    pub bridges_to_master: Option<RawValue>,
}

impl MemoryMappedDecl {
    /// Declares a port with nothing but its clock and reset.
    pub fn new(
        name: impl Into<String>,
        clock: impl Into<String>,
        reset: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            clock: clock.into(),
            reset: reset.into(),
            address: None,
            burst: None,
            data_width: None,
            write: None,
            read: None,
            wait_request: None,
            read_data_valid: None,
            setup_time: None,
            bridges_to_master: None,
        }
    }

    /// Sets the address signal.
    pub fn with_address(mut self, address: AddressDecl) -> Self {
        self.address = Some(address);
        self
    }

    /// Sets the burst-count signal.
    pub fn with_burst(mut self, burst: BurstDecl) -> Self {
        self.burst = Some(burst);
        self
    }

    /// Sets the data width.
    pub fn with_data_width(mut self, width: impl Into<RawValue>) -> Self {
        self.data_width = Some(width.into());
        self
    }

    /// Sets the write side.
    pub fn with_write(mut self, write: WriteDecl) -> Self {
        self.write = Some(write);
        self
    }

    /// Sets the read side.
    pub fn with_read(mut self, read: ReadDecl) -> Self {
        self.read = Some(read);
        self
    }

    /// Sets the flow-control signals.
    pub fn with_flow_control(
        mut self,
        wait_request: impl Into<String>,
        read_data_valid: impl Into<String>,
    ) -> Self {
        self.wait_request = Some(wait_request.into());
        self.read_data_valid = Some(read_data_valid.into());
        self
    }

    /// Sets the setup time.
    pub fn with_setup_time(mut self, setup_time: impl Into<RawValue>) -> Self {
        self.setup_time = Some(setup_time.into());
        self
    }

    /// Sets the bridges-to-master flag.
    pub fn with_bridges_to_master(mut self, bridges: impl Into<RawValue>) -> Self {
        self.bridges_to_master = Some(bridges.into());
        self
    }
}

/// Which side of the bus a memory-mapped port sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MemoryMappedRole {
    /// Responds to transactions.
    Slave,
    /// Issues transactions.
    Master,
}

impl fmt::Display for MemoryMappedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MemoryMappedRole::Slave => "MMSlave",
            MemoryMappedRole::Master => "MMMaster",
        })
    }
}

/// A resolved address signal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Address {
    /// The signal name.
    pub name: String,
    /// The address width.
    pub width: Resolved<u64>,
}

/// A resolved burst-count signal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Burst {
    /// The signal name.
    pub name: String,
    /// The largest burst.
    pub max_count: Resolved<u64>,
    /// The signal width.
    pub width: Resolved<u64>,
    /// Bursts never cross a burst-size boundary.
    pub on_boundaries_only: Resolved<bool>,
    /// Bursts wrap at line boundaries.
    pub line_wrap: Resolved<bool>,
}

/// A resolved write side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WritePort {
    /// The write-data signal.
    pub data: String,
    /// The write strobe.
    pub strobe: String,
    /// Symbol width for byte enables.
    pub symbol_width: Resolved<u64>,
    /// The byte-enable signal, one bit per symbol.
    pub byte_enable: Option<SizedSignal>,
    /// Write wait time in cycles.
    pub wait_time: Resolved<u64>,
    /// Hold time in cycles.
    pub hold_time: Resolved<u64>,
}

/// A resolved read side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReadPort {
    /// The read strobe.
    pub strobe: String,
    /// The read-data signal.
    pub data: String,
    /// Maximum outstanding read transactions.
    pub max_pending: Resolved<u64>,
    /// Read wait time in cycles.
    pub wait_time: Resolved<u64>,
    /// Read latency in cycles.
    pub latency: Resolved<u64>,
}

/// A resolved memory-mapped port.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemoryMappedPort {
    /// The connection point name.
    pub name: String,
    /// Slave or master.
    pub role: MemoryMappedRole,
    /// The associated clock.
    pub clock: String,
    /// The associated reset.
    pub reset: String,
    /// The address signal.
    pub address: Option<Address>,
    /// The burst-count signal.
    pub burst: Option<Burst>,
    /// Data width in bits.
    pub data_width: Resolved<u64>,
    /// The write side.
    pub write: Option<WritePort>,
    /// The read side.
    pub read: Option<ReadPort>,
    /// The wait-request signal.
    pub wait_request: Option<String>,
    /// The read-data-valid signal.
    pub read_data_valid: Option<String>,
    /// Setup time in cycles.
    pub setup_time: Resolved<u64>,
    /// Whether the slave bridges to a master. Always `None` for masters.
    pub bridges_to_master: Option<Resolved<bool>>,
    #[serde(skip)]
    pub(crate) decl: MemoryMappedDecl,
}

impl MemoryMappedPort {
    /// Resolves a memory-mapped declaration against the parameter table.
    pub fn resolve(
        params: &ParameterTable,
        role: MemoryMappedRole,
        decl: &MemoryMappedDecl,
    ) -> Result<Self, PortError> {
        let r = Resolver::new(params, &decl.name);

        let address = decl.address.as_ref().map(|a| resolve_address(r, a)).transpose()?;
        let burst = decl.burst.as_ref().map(|b| resolve_burst(r, b)).transpose()?;
        let data_width = r.natural("data width", decl.data_width.as_ref(), DEFAULT_DATA_WIDTH)?;
        if data_width.value == 0 {
            return Err(PortError::InvalidWidth {
                point: decl.name.clone(),
                field: "data width",
                value: data_width.to_string(),
            });
        }
        let write = decl
            .write
            .as_ref()
            .map(|w| resolve_write(r, w, data_width.value))
            .transpose()?;
        let read = decl
            .read
            .as_ref()
            .map(|rd| -> Result<ReadPort, PortError> {
                Ok(ReadPort {
                    strobe: rd.strobe.clone(),
                    data: rd.data.clone(),
                    max_pending: r.natural("max pending reads", rd.max_pending.as_ref(), 0)?,
                    wait_time: r.natural(
                        "read wait time",
                        rd.wait_time.as_ref(),
                        DEFAULT_READ_WAIT_TIME,
                    )?,
                    latency: r.natural("read latency", rd.latency.as_ref(), 0)?,
                })
            })
            .transpose()?;
        let setup_time = r.natural("setup time", decl.setup_time.as_ref(), 0)?;
        let bridges_to_master = match role {
            MemoryMappedRole::Slave => {
                Some(r.flag("bridges to master", decl.bridges_to_master.as_ref(), false)?)
            }
            MemoryMappedRole::Master => None,
        };

        Ok(Self {
            name: decl.name.clone(),
            role,
            clock: decl.clock.clone(),
            reset: decl.reset.clone(),
            address,
            burst,
            data_width,
            write,
            read,
            wait_request: decl.wait_request.clone(),
            read_data_valid: decl.read_data_valid.clone(),
            setup_time,
            bridges_to_master,
            decl: decl.clone(),
        })
    }

    /// Re-runs resolution from the stored declaration.
    pub fn refreshed(&self, params: &ParameterTable) -> Result<Self, PortError> {
        Self::resolve(params, self.role, &self.decl)
    }

    /// The declaration this port was resolved from.
    pub fn decl(&self) -> &MemoryMappedDecl {
        &self.decl
    }

    /// Width of the burst-count signal, when present.
    pub fn width_burst_count(&self) -> Option<u64> {
        self.burst.as_ref().map(|b| b.width.value)
    }

    /// Width of the byte-enable signal, when present.
    pub fn width_byte_enable(&self) -> Option<u32> {
        self.write.as_ref()?.byte_enable.as_ref().map(|b| b.width)
    }

    /// Every symbolic field as `(field, parameter)`, in a fixed order.
    pub fn symbolic_fields(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        if let Some(a) = &self.address {
            push_key(&mut out, "address width", a.width.key());
        }
        if let Some(b) = &self.burst {
            push_key(&mut out, "max burst count", b.max_count.key());
            push_key(&mut out, "burst width", b.width.key());
            push_key(&mut out, "burst on boundaries only", b.on_boundaries_only.key());
            push_key(&mut out, "line wrap bursts", b.line_wrap.key());
        }
        push_key(&mut out, "data width", self.data_width.key());
        if let Some(w) = &self.write {
            push_key(&mut out, "symbol width", w.symbol_width.key());
            push_key(&mut out, "write wait time", w.wait_time.key());
            push_key(&mut out, "hold time", w.hold_time.key());
        }
        if let Some(rd) = &self.read {
            push_key(&mut out, "max pending reads", rd.max_pending.key());
            push_key(&mut out, "read wait time", rd.wait_time.key());
            push_key(&mut out, "read latency", rd.latency.key());
        }
        push_key(&mut out, "setup time", self.setup_time.key());
        push_key(
            &mut out,
            "bridges to master",
            self.bridges_to_master.as_ref().and_then(|b| b.key()),
        );
        out
    }
}

fn resolve_address(r: Resolver<'_>, decl: &AddressDecl) -> Result<Address, PortError> {
    let invalid = |reason: String| PortError::InvalidAddressDescriptor {
        point: r.point().to_string(),
        reason,
    };
    if decl.name.trim().is_empty() {
        return Err(invalid("address signal has no name".into()));
    }
    let width = r
        .try_natural("address width", &decl.width)?
        .ok_or_else(|| invalid(format!("address width '{}' is not a number", decl.width)))?;
    Ok(Address {
        name: decl.name.clone(),
        width,
    })
}

fn resolve_burst(r: Resolver<'_>, decl: &BurstDecl) -> Result<Burst, PortError> {
    let max_count = r.natural("max burst count", Some(&decl.max_count), 0)?;
    let width = match &decl.width {
        Some(raw) => r.natural("burst width", Some(raw), 0)?,
        // Computed against the current maximum; a symbolic maximum is
        // picked up again on refresh.
        None => Resolved::immediate(u64::from(bits_for_count(max_count.value).max(1))),
    };
    Ok(Burst {
        name: decl.name.clone(),
        max_count,
        width,
        on_boundaries_only: r.flag(
            "burst on boundaries only",
            decl.on_boundaries_only.as_ref(),
            false,
        )?,
        line_wrap: r.flag("line wrap bursts", decl.line_wrap.as_ref(), false)?,
    })
}

fn resolve_write(
    r: Resolver<'_>,
    decl: &WriteDecl,
    data_width: u64,
) -> Result<WritePort, PortError> {
    let symbol_width = r.natural("symbol width", decl.symbol_width.as_ref(), DEFAULT_SYMBOL_WIDTH)?;
    let byte_enable = match &decl.byte_enable {
        Some(name) => {
            if symbol_width.value == 0 {
                return Err(PortError::InvalidWidth {
                    point: r.point().to_string(),
                    field: "symbol width",
                    value: symbol_width.to_string(),
                });
            }
            if data_width % symbol_width.value != 0 {
                return Err(PortError::NonIntegralSymbolCount {
                    point: r.point().to_string(),
                    width: data_width,
                    symbol_width: symbol_width.value,
                });
            }
            let count = data_width / symbol_width.value;
            let width = u32::try_from(count).map_err(|_| PortError::InvalidWidth {
                point: r.point().to_string(),
                field: "byte enable width",
                value: count.to_string(),
            })?;
            Some(SizedSignal::new(name.clone(), width))
        }
        None => None,
    };
    Ok(WritePort {
        data: decl.data.clone(),
        strobe: decl.strobe.clone(),
        symbol_width,
        byte_enable,
        wait_time: r.natural("write wait time", decl.wait_time.as_ref(), 0)?,
        hold_time: r.natural("hold time", decl.hold_time.as_ref(), 0)?,
    })
}

impl Dump for MemoryMappedPort {
    fn dump(&self, out: &mut Dumper) {
        out.line(format_args!("Connection Point {}: {}", self.role, self.name));
        out.nested(|out| {
            out.line(format_args!(
                "associated clock and reset: {}, {}",
                self.clock, self.reset
            ));
            match &self.address {
                Some(a) => out.line(format_args!("Address: {} width: {}", a.name, a.width)),
                None => out.line("Address: none"),
            }
            if let Some(b) = &self.burst {
                out.line(format_args!(
                    "Burst: {} max count: {}, width: {}, on boundaries only: {}, line wrap: {}",
                    b.name, b.max_count, b.width, b.on_boundaries_only, b.line_wrap
                ));
            }
            out.line(format_args!("Data width: {}", self.data_width));
            if let Some(w) = &self.write {
                let be = w
                    .byte_enable
                    .as_ref()
                    .map_or_else(|| "none".to_string(), |b| b.to_string());
                out.line(format_args!(
                    "Write: data: {}, strobe: {}, symbol width: {}, byte enable: {be},",
                    w.data, w.strobe, w.symbol_width
                ));
                out.nested(|out| {
                    out.line(format_args!(
                        "wait time: {}, hold time: {}",
                        w.wait_time, w.hold_time
                    ))
                });
            }
            if let Some(rd) = &self.read {
                out.line(format_args!(
                    "Read: strobe: {}, data: {}, max pending: {}, wait time: {}, latency: {}",
                    rd.strobe, rd.data, rd.max_pending, rd.wait_time, rd.latency
                ));
            }
            out.line(format_args!(
                "Wait request: {}, read data valid: {}",
                or_none(&self.wait_request),
                or_none(&self.read_data_valid)
            ));
            match &self.bridges_to_master {
                Some(b) => out.line(format_args!(
                    "Setup time: {}, bridges to master: {b}",
                    self.setup_time
                )),
                None => out.line(format_args!("Setup time: {}", self.setup_time)),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwif_params::ParameterDecl;

    fn params() -> ParameterTable {
        ParameterTable::from_decls([
            ParameterDecl::natural("WIDTH_AS", 8),
            ParameterDecl::natural("WIDTH_MM_D", 32),
            ParameterDecl::natural("MAXIMUM_BURSTCOUNT", 4),
            ParameterDecl::natural("WIDTH_BURSTCOUNT", 4),
            ParameterDecl::boolean("BURST_ON_BURST_BOUNDARIES_ONLY", true),
            ParameterDecl::boolean("LINE_WRAP_BURSTS", true),
            ParameterDecl::natural("WRITE_WAIT_TIME", 0),
            ParameterDecl::natural("HOLD_TIME", 0),
            ParameterDecl::natural("MAXIMUM_PENDING_READ_TRANSACTIONS", 2),
            ParameterDecl::natural("READ_WAIT_TIME", 1),
            ParameterDecl::natural("READ_LATENCY", 0),
            ParameterDecl::boolean("BRIDGES_TO_MASTER", false),
            ParameterDecl::natural("SETUP_TIME", 0),
        ])
        .unwrap()
    }

    fn full_slave() -> MemoryMappedDecl {
        MemoryMappedDecl::new("csr", "ClkMMS", "ResetMMS")
            .with_address(AddressDecl::new("AS", "WIDTH_AS"))
            .with_burst(
                BurstDecl::new("BurstCountS", "MAXIMUM_BURSTCOUNT")
                    .with_width("WIDTH_BURSTCOUNT")
                    .with_shape("BURST_ON_BURST_BOUNDARIES_ONLY", "LINE_WRAP_BURSTS"),
            )
            .with_data_width("WIDTH_MM_D")
            .with_write(
                WriteDecl::new("WDS", "WrS")
                    .with_byte_enable("ByteEnableS", "WIDTH_MM_D")
                    .with_timing("WRITE_WAIT_TIME", "HOLD_TIME"),
            )
            .with_read(ReadDecl::new("RdS", "RQS").with_timing(
                "MAXIMUM_PENDING_READ_TRANSACTIONS",
                "READ_WAIT_TIME",
                "READ_LATENCY",
            ))
            .with_flow_control("WaitRequestS", "ReadDataValidS")
            .with_setup_time("SETUP_TIME")
            .with_bridges_to_master("BRIDGES_TO_MASTER")
    }

    fn slave(decl: MemoryMappedDecl) -> Result<MemoryMappedPort, PortError> {
        MemoryMappedPort::resolve(&params(), MemoryMappedRole::Slave, &decl)
    }

    #[test]
    fn burst_width_computed_from_maximum() {
        let p = slave(
            MemoryMappedDecl::new("csr", "Clk", "Reset")
                .with_burst(BurstDecl::new("BurstCountS", "MAXIMUM_BURSTCOUNT")),
        )
        .unwrap();
        assert_eq!(p.width_burst_count(), Some(2));
        let b = p.burst.unwrap();
        assert_eq!(b.max_count, Resolved::symbolic(4, "MAXIMUM_BURSTCOUNT"));
        assert!(!b.width.is_symbolic());
        assert!(!b.on_boundaries_only.value);
    }

    #[test]
    fn burst_width_of_small_maximum_is_one() {
        for max in [1u64, 2] {
            let p = slave(
                MemoryMappedDecl::new("csr", "Clk", "Reset").with_burst(BurstDecl::new("Bc", max)),
            )
            .unwrap();
            assert_eq!(p.width_burst_count(), Some(1), "max {max}");
        }
    }

    #[test]
    fn explicit_burst_width_wins() {
        let p = slave(full_slave()).unwrap();
        let b = p.burst.as_ref().unwrap();
        assert_eq!(b.width, Resolved::symbolic(4, "WIDTH_BURSTCOUNT"));
        assert_eq!(
            b.on_boundaries_only,
            Resolved::symbolic(true, "BURST_ON_BURST_BOUNDARIES_ONLY")
        );
    }

    #[test]
    fn full_slave_resolves() {
        let p = slave(full_slave()).unwrap();
        assert_eq!(p.address.as_ref().unwrap().width, Resolved::symbolic(8, "WIDTH_AS"));
        assert_eq!(p.data_width, Resolved::symbolic(32, "WIDTH_MM_D"));
        let w = p.write.as_ref().unwrap();
        assert_eq!(w.byte_enable, Some(SizedSignal::new("ByteEnableS", 1)));
        let rd = p.read.as_ref().unwrap();
        assert_eq!(rd.max_pending.value, 2);
        assert_eq!(rd.wait_time, Resolved::symbolic(1, "READ_WAIT_TIME"));
        assert_eq!(p.bridges_to_master, Some(Resolved::symbolic(false, "BRIDGES_TO_MASTER")));
        assert_eq!(p.symbolic_fields().len(), 14);
    }

    #[test]
    fn defaults_for_literal_slave() {
        let p = slave(
            MemoryMappedDecl::new("csr2", "ClkMMS", "ResetMMS")
                .with_address(AddressDecl::new("AS2", "4"))
                .with_data_width("32")
                .with_write(WriteDecl::new("WDS2", "WrS2"))
                .with_read(ReadDecl::new("RdS2", "RQS2")),
        )
        .unwrap();
        assert_eq!(p.address.as_ref().unwrap().width, Resolved::immediate(4));
        let w = p.write.as_ref().unwrap();
        assert_eq!(w.symbol_width, Resolved::immediate(8));
        assert_eq!(w.byte_enable, None);
        assert_eq!(w.wait_time.value, 0);
        assert_eq!(w.hold_time.value, 0);
        let rd = p.read.as_ref().unwrap();
        assert_eq!(rd.max_pending.value, 0);
        assert_eq!(rd.wait_time.value, 1);
        assert_eq!(rd.latency.value, 0);
        assert_eq!(p.setup_time.value, 0);
        assert_eq!(p.bridges_to_master, Some(Resolved::immediate(false)));
        assert!(p.symbolic_fields().is_empty());
    }

    #[test]
    fn data_width_defaults_to_32() {
        let p = slave(
            MemoryMappedDecl::new("csr", "Clk", "Reset")
                .with_write(WriteDecl::new("WD", "Wr").with_byte_enable("BE", 8u64)),
        )
        .unwrap();
        assert_eq!(p.data_width, Resolved::immediate(32));
        assert_eq!(p.width_byte_enable(), Some(4));
    }

    #[test]
    fn write_only_read_only_and_bare_ports() {
        let decl = MemoryMappedDecl::new("csr3", "Clk", "Reset");
        let p = slave(decl.with_write(WriteDecl::new("WDS3", "WrS3"))).unwrap();
        assert!(p.write.is_some() && p.read.is_none());
        let decl = MemoryMappedDecl::new("csr4", "Clk", "Reset");
        let p = slave(decl.with_read(ReadDecl::new("RQS4", "RdS43"))).unwrap();
        assert!(p.write.is_none() && p.read.is_some());
        let decl = MemoryMappedDecl::new("ctl", "Clk", "Reset");
        let p = slave(decl.with_address(AddressDecl::new("A", 2u64))).unwrap();
        assert!(p.write.is_none() && p.read.is_none());
    }

    #[test]
    fn masters_ignore_bridges_to_master() {
        let decl = full_slave();
        let p = MemoryMappedPort::resolve(&params(), MemoryMappedRole::Master, &decl).unwrap();
        assert_eq!(p.bridges_to_master, None);
        assert_eq!(p.symbolic_fields().len(), 13);
    }

    #[test]
    fn malformed_address() {
        let with_address = |address| {
            slave(MemoryMappedDecl::new("csr", "Clk", "Reset").with_address(address))
        };
        let err = with_address(AddressDecl::new("", 4u64)).unwrap_err();
        assert!(matches!(err, PortError::InvalidAddressDescriptor { .. }));
        let err = with_address(AddressDecl::new("A", true)).unwrap_err();
        assert!(matches!(err, PortError::InvalidAddressDescriptor { .. }));
        let err = with_address(AddressDecl::new("A", "WIDTH_X")).unwrap_err();
        assert!(matches!(err, PortError::UnresolvedParameter { .. }));
    }

    #[test]
    fn invalid_widths() {
        for width in [RawValue::from("3x"), RawValue::Int(0)] {
            let decl = MemoryMappedDecl::new("csr", "Clk", "Reset").with_data_width(width);
            let err = slave(decl).unwrap_err();
            assert!(matches!(err, PortError::InvalidWidth { field: "data width", .. }));
        }
        let err = slave(
            MemoryMappedDecl::new("csr", "Clk", "Reset")
                .with_burst(BurstDecl::new("Bc", "BURST_ON_BURST_BOUNDARIES_ONLY")),
        )
        .unwrap_err();
        assert!(matches!(err, PortError::InvalidWidth { field: "max burst count", .. }));
    }

    #[test]
    fn non_integral_byte_enables() {
        let err = slave(
            MemoryMappedDecl::new("csr", "Clk", "Reset")
                .with_data_width(32u64)
                .with_write(WriteDecl::new("WD", "Wr").with_byte_enable("BE", 12u64)),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PortError::NonIntegralSymbolCount { width: 32, symbol_width: 12, .. }
        ));
    }

    #[test]
    fn refresh_recomputes_burst_width() {
        let mut p = params();
        let decl = MemoryMappedDecl::new("csr", "Clk", "Reset")
            .with_burst(BurstDecl::new("BurstCountS", "MAXIMUM_BURSTCOUNT"));
        let port = MemoryMappedPort::resolve(&p, MemoryMappedRole::Slave, &decl).unwrap();
        p.update("MAXIMUM_BURSTCOUNT", &RawValue::Int(16)).unwrap();
        let port = port.refreshed(&p).unwrap();
        assert_eq!(port.width_burst_count(), Some(4));
    }

    #[test]
    fn dump_shows_every_attribute() {
        let text = slave(full_slave()).unwrap().dump_to_string();
        assert!(text.starts_with("Connection Point MMSlave: csr\n"));
        assert!(text.contains("    Address: AS width: 8 (WIDTH_AS)\n"));
        assert!(text.contains("Burst: BurstCountS max count: 4 (MAXIMUM_BURSTCOUNT),"));
        assert!(text.contains(", width: 4 (WIDTH_BURSTCOUNT), on boundaries only: true"));
        assert!(text.contains("byte enable: ByteEnableS [1 bits]"));
        assert!(text.contains("Read: strobe: RdS, data: RQS, max pending: 2"));
        assert!(text.contains("(MAXIMUM_PENDING_READ_TRANSACTIONS)"));
        assert!(text.contains("\n        wait time: 0 (WRITE_WAIT_TIME), hold time: 0"));
        assert!(text.contains("Wait request: WaitRequestS, read data valid: ReadDataValidS"));
        assert!(text.contains("bridges to master: false (BRIDGES_TO_MASTER)"));
    }
}
