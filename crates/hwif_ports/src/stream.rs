//! Streaming sink and source endpoints.
//!
//! Signal names derive from the data base name `d`: the payload is
//! `dPayLoad`, and the optional signals are `dValid`, `dReady`, `dSoP`,
//! `dEoP`, `dEmpty`, `dChannel` and `dError`.

use std::fmt;

use hwif_common::{bits_for_count, bits_for_value, Dump, Dumper, RawValue};
use hwif_params::ParameterTable;
use serde::{Deserialize, Serialize};

use crate::error::PortError;
use crate::resolve::{Resolved, Resolver};
use crate::signal::{or_none, SizedSignal};

/// Data signal descriptor of a stream endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StreamDataDecl {
    /// Base name from which every signal name is derived.
    pub name: String,
    /// Data width: literal, digit string, or parameter name.
    pub width: RawValue,
    /// Symbol width; defaults to the data width.
    #[serde(default)]
    pub symbol_width: Option<RawValue>,
    /// Handshake mode literal, or the name of a String parameter holding one.
    #[serde(default)]
    pub handshake: Option<String>,
}

impl StreamDataDecl {
    /// Describes data signals with base name `name` and the given width.
    pub fn new(name: impl Into<String>, width: impl Into<RawValue>) -> Self {
        Self {
            name: name.into(),
            width: width.into(),
            symbol_width: None,
            handshake: None,
        }
    }

    /// Sets the symbol width.
    pub fn with_symbol_width(mut self, symbol_width: impl Into<RawValue>) -> Self {
        self.symbol_width = Some(symbol_width.into());
        self
    }

    /// Sets the handshake mode or mode parameter.
    pub fn with_handshake(mut self, handshake: impl Into<String>) -> Self {
        self.handshake = Some(handshake.into());
        self
    }
}

/// Packet framing descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PacketDecl {
    /// Whether start/end-of-packet signals exist: flag literal or parameter.
    pub use_packets: RawValue,
    /// Whether the empty-symbol-count signal exists.
    #[serde(default)]
    pub use_empty: Option<RawValue>,
}

impl PacketDecl {
    /// Describes packet framing.
    pub fn new(use_packets: impl Into<RawValue>) -> Self {
        Self {
            use_packets: use_packets.into(),
            use_empty: None,
        }
    }

    /// Adds the empty-symbol-count signal.
    pub fn with_empty(mut self, use_empty: impl Into<RawValue>) -> Self {
        self.use_empty = Some(use_empty.into());
        self
    }
}

/// Channel tagging descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChannelDecl {
    /// Whether the channel signal exists: flag literal or parameter.
    pub use_channel: RawValue,
    /// The highest channel number; required when the channel is in use.
    #[serde(default)]
    pub max_channel: Option<RawValue>,
}

impl ChannelDecl {
    /// Describes a channel signal.
    pub fn new(use_channel: impl Into<RawValue>, max_channel: impl Into<RawValue>) -> Self {
        Self {
            use_channel: use_channel.into(),
            max_channel: Some(max_channel.into()),
        }
    }
}

/// Error tagging descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorDecl {
    /// Width of the error signal.
    pub width: RawValue,
    /// Human-readable meaning of each error bit.
    #[serde(default)]
    pub descriptors: Vec<String>,
}

impl ErrorDecl {
    /// Describes an error signal of the given width.
    pub fn new(width: impl Into<RawValue>) -> Self {
        Self {
            width: width.into(),
            descriptors: Vec::new(),
        }
    }

    /// Attaches error descriptions.
    pub fn with_descriptors<S: Into<String>>(
        mut self,
        descriptors: impl IntoIterator<Item = S>,
    ) -> Self {
        self.descriptors = descriptors.into_iter().map(Into::into).collect();
        self
    }
}

/// Declaration of a streaming endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StreamDecl {
    /// The connection point name.
    pub name: String,
    /// The associated clock.
    pub clock: String,
    /// The associated reset.
    pub reset: String,
    /// The data descriptor.
    pub data: StreamDataDecl,
    /// Optional packet framing.
    #[serde(default)]
    pub packets: Option<PacketDecl>,
    /// Optional channel tagging.
    #[serde(default)]
    pub channel: Option<ChannelDecl>,
    /// Optional error tagging.
    #[serde(default)]
    pub error: Option<ErrorDecl>,
}

impl StreamDecl {
    /// Declares a stream endpoint with only its data signals.
    pub fn new(
        name: impl Into<String>,
        clock: impl Into<String>,
        reset: impl Into<String>,
        data: StreamDataDecl,
    ) -> Self {
        Self {
            name: name.into(),
            clock: clock.into(),
            reset: reset.into(),
            data,
            packets: None,
            channel: None,
            error: None,
        }
    }

    /// Adds packet framing.
    pub fn with_packets(mut self, packets: PacketDecl) -> Self {
        self.packets = Some(packets);
        self
    }

    /// Adds channel tagging.
    pub fn with_channel(mut self, channel: ChannelDecl) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Adds error tagging.
    pub fn with_error(mut self, error: ErrorDecl) -> Self {
        self.error = Some(error);
        self
    }
}

/// Which way data flows through a stream endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StreamDirection {
    /// Data flows into the module.
    Sink,
    /// Data flows out of the module.
    Source,
}

impl fmt::Display for StreamDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StreamDirection::Sink => "Sink",
            StreamDirection::Source => "Source",
        })
    }
}

/// The valid/ready handshake discipline of a stream endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum HandshakeMode {
    /// Both `valid` and `ready`.
    Standard,
    /// No `ready`: the endpoint never applies backpressure.
    NoReady,
    /// No `valid`: data is valid on every cycle.
    NoValid,
    /// Both signals exist; `ready` is terminated.
    NoBackpressure,
    /// Both signals exist; `valid` is terminated.
    NoFeed,
}

impl HandshakeMode {
    /// Looks up a mode by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "STANDARD" => Some(HandshakeMode::Standard),
            "NO_READY" => Some(HandshakeMode::NoReady),
            "NO_VALID" => Some(HandshakeMode::NoValid),
            "NO_BACKPRESSURE" => Some(HandshakeMode::NoBackpressure),
            "NO_FEED" => Some(HandshakeMode::NoFeed),
            _ => None,
        }
    }
}

impl fmt::Display for HandshakeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandshakeMode::Standard => "Standard",
            HandshakeMode::NoReady => "NO_READY",
            HandshakeMode::NoValid => "NO_VALID",
            HandshakeMode::NoBackpressure => "NO_BACKPRESSURE",
            HandshakeMode::NoFeed => "NO_FEED",
        })
    }
}

/// Resolved handshake signals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Handshake {
    /// The mode in force, or `None` while a derived mode parameter awaits its host value.
    pub mode: Option<HandshakeMode>,
    /// The mode parameter, when the mode is symbolic.
    pub key: Option<String>,
    /// The valid signal, if present.
    pub valid: Option<String>,
    /// The ready signal, if present.
    pub ready: Option<String>,
    /// Whether `valid` is present but tied off.
    pub valid_terminated: bool,
    /// Whether `ready` is present but tied off.
    pub ready_terminated: bool,
}

impl Handshake {
    fn new(base: &str, mode: Option<HandshakeMode>, key: Option<String>) -> Self {
        let valid = format!("{base}Valid");
        let ready = format!("{base}Ready");
        let (valid, ready) = match mode {
            Some(HandshakeMode::NoReady) => (Some(valid), None),
            Some(HandshakeMode::NoValid) => (None, Some(ready)),
            _ => (Some(valid), Some(ready)),
        };
        Self {
            mode,
            key,
            valid,
            ready,
            valid_terminated: mode == Some(HandshakeMode::NoFeed),
            ready_terminated: mode == Some(HandshakeMode::NoBackpressure),
        }
    }

    fn resolve(r: Resolver<'_>, base: &str, raw: Option<&str>) -> Result<Self, PortError> {
        let Some(raw) = raw else {
            return Ok(Self::new(base, Some(HandshakeMode::Standard), None));
        };
        if let Some(mode) = HandshakeMode::from_name(raw) {
            return Ok(Self::new(base, Some(mode), None));
        }
        let invalid = |mode: String| PortError::InvalidHandshakeMode {
            point: r.point().to_string(),
            mode,
        };
        let param = r
            .params()
            .get(raw)
            .ok_or_else(|| invalid(raw.to_string()))?;
        match param.value().as_str().and_then(HandshakeMode::from_name) {
            Some(mode) => Ok(Self::new(base, Some(mode), Some(raw.to_string()))),
            // The host supplies the real mode later.
            None if param.derived && !param.is_supplied() => {
                Ok(Self::new(base, None, Some(raw.to_string())))
            }
            None => Err(invalid(format!("{raw} = {}", param.value()))),
        }
    }
}

/// Resolved packet framing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Packets {
    /// Whether packet signals are enabled.
    pub use_packets: Resolved<bool>,
    /// Whether the empty signal was requested.
    pub use_empty: Option<Resolved<bool>>,
    /// The start-of-packet signal, when enabled.
    pub start_of_packet: Option<String>,
    /// The end-of-packet signal, when enabled.
    pub end_of_packet: Option<String>,
    /// The empty-symbol-count signal, when enabled and meaningful.
    pub empty: Option<SizedSignal>,
}

/// Resolved channel tagging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Channel {
    /// Whether the channel signal is enabled.
    pub use_channel: Resolved<bool>,
    /// The highest channel number.
    pub max_channel: Option<Resolved<u64>>,
    /// The channel signal, when enabled.
    pub signal: Option<SizedSignal>,
}

/// Resolved error tagging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorSignal {
    /// The error signal name.
    pub name: String,
    /// The error signal width.
    pub width: Resolved<u64>,
    /// Human-readable meaning of each error bit.
    pub descriptors: Vec<String>,
}

/// A resolved streaming endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StreamEndpoint {
    /// The connection point name.
    pub name: String,
    /// Sink or source.
    pub direction: StreamDirection,
    /// The associated clock.
    pub clock: String,
    /// The associated reset.
    pub reset: String,
    /// The payload signal.
    pub data: String,
    /// Payload width in bits.
    pub data_width: Resolved<u64>,
    /// Symbol width in bits.
    pub symbol_width: Resolved<u64>,
    /// `data_width / symbol_width`.
    pub symbols_per_beat: u64,
    /// Cycles between `ready` and accepted data; always 0.
    pub ready_latency: u32,
    /// Valid/ready signals.
    pub handshake: Handshake,
    /// Packet framing, if declared.
    pub packets: Option<Packets>,
    /// Channel tagging, if declared.
    pub channel: Option<Channel>,
    /// Error tagging, if declared.
    pub error: Option<ErrorSignal>,
    #[serde(skip)]
    pub(crate) decl: StreamDecl,
}

impl StreamEndpoint {
    /// Resolves a stream declaration against the parameter table.
    pub fn resolve(
        params: &ParameterTable,
        direction: StreamDirection,
        decl: &StreamDecl,
    ) -> Result<Self, PortError> {
        let r = Resolver::new(params, &decl.name);
        let base = decl.data.name.as_str();

        let data_width = r.natural("data width", Some(&decl.data.width), 0)?;
        if data_width.value == 0 {
            return Err(PortError::InvalidWidth {
                point: decl.name.clone(),
                field: "data width",
                value: data_width.to_string(),
            });
        }
        let symbol_width = match &decl.data.symbol_width {
            Some(raw) => r.natural("symbol width", Some(raw), 0)?,
            None => data_width.clone(),
        };
        if symbol_width.value == 0 {
            return Err(PortError::InvalidWidth {
                point: decl.name.clone(),
                field: "symbol width",
                value: symbol_width.to_string(),
            });
        }
        if data_width.value % symbol_width.value != 0 {
            return Err(PortError::NonIntegralSymbolCount {
                point: decl.name.clone(),
                width: data_width.value,
                symbol_width: symbol_width.value,
            });
        }
        let symbols_per_beat = data_width.value / symbol_width.value;

        let handshake = Handshake::resolve(r, base, decl.data.handshake.as_deref())?;

        let packets = decl
            .packets
            .as_ref()
            .map(|p| resolve_packets(r, base, p, symbols_per_beat))
            .transpose()?;
        let channel = decl
            .channel
            .as_ref()
            .map(|c| resolve_channel(r, base, c))
            .transpose()?;
        let error = decl
            .error
            .as_ref()
            .map(|e| -> Result<ErrorSignal, PortError> {
                Ok(ErrorSignal {
                    name: format!("{base}Error"),
                    width: r.natural("error width", Some(&e.width), 0)?,
                    descriptors: e.descriptors.clone(),
                })
            })
            .transpose()?;

        Ok(Self {
            name: decl.name.clone(),
            direction,
            clock: decl.clock.clone(),
            reset: decl.reset.clone(),
            data: format!("{base}PayLoad"),
            data_width,
            symbol_width,
            symbols_per_beat,
            ready_latency: 0,
            handshake,
            packets,
            channel,
            error,
            decl: decl.clone(),
        })
    }

    /// Re-runs resolution from the stored declaration.
    pub fn refreshed(&self, params: &ParameterTable) -> Result<Self, PortError> {
        Self::resolve(params, self.direction, &self.decl)
    }

    /// The declaration this endpoint was resolved from.
    pub fn decl(&self) -> &StreamDecl {
        &self.decl
    }

    /// Width of the empty signal, when present.
    pub fn width_empty(&self) -> Option<u32> {
        self.packets.as_ref()?.empty.as_ref().map(|e| e.width)
    }

    /// Width of the channel signal, when present.
    pub fn width_channel(&self) -> Option<u32> {
        self.channel.as_ref()?.signal.as_ref().map(|s| s.width)
    }

    /// Every symbolic field as `(field, parameter)`, in a fixed order.
    pub fn symbolic_fields(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        push_key(&mut out, "data width", self.data_width.key());
        if self.decl.data.symbol_width.is_some() {
            push_key(&mut out, "symbol width", self.symbol_width.key());
        }
        push_key(&mut out, "handshake", self.handshake.key.as_deref());
        if let Some(p) = &self.packets {
            push_key(&mut out, "use packets", p.use_packets.key());
            push_key(&mut out, "use empty", p.use_empty.as_ref().and_then(|e| e.key()));
        }
        if let Some(c) = &self.channel {
            push_key(&mut out, "use channel", c.use_channel.key());
            push_key(&mut out, "max channel", c.max_channel.as_ref().and_then(|m| m.key()));
        }
        if let Some(e) = &self.error {
            push_key(&mut out, "error width", e.width.key());
        }
        out
    }
}

pub(crate) fn push_key<'a>(
    out: &mut Vec<(&'static str, &'a str)>,
    field: &'static str,
    key: Option<&'a str>,
) {
    if let Some(key) = key {
        out.push((field, key));
    }
}

fn resolve_packets(
    r: Resolver<'_>,
    base: &str,
    decl: &PacketDecl,
    symbols_per_beat: u64,
) -> Result<Packets, PortError> {
    let invalid = |what: &str, raw: &RawValue| PortError::InvalidPacketDescriptor {
        point: r.point().to_string(),
        reason: format!("{what} '{raw}' is not a flag"),
    };
    let use_packets = r
        .try_flag("use packets", &decl.use_packets)?
        .ok_or_else(|| invalid("use_packets", &decl.use_packets))?;
    let use_empty = decl
        .use_empty
        .as_ref()
        .map(|raw| {
            r.try_flag("use empty", raw)?
                .ok_or_else(|| invalid("use_empty", raw))
        })
        .transpose()?;

    let enabled = use_packets.value;
    let empty_enabled = enabled && use_empty.as_ref().is_some_and(|e| e.value);
    // A single symbol per beat leaves nothing for an empty count to say.
    let empty = (empty_enabled && symbols_per_beat > 1)
        .then(|| SizedSignal::new(format!("{base}Empty"), bits_for_count(symbols_per_beat)));

    Ok(Packets {
        use_packets,
        use_empty,
        start_of_packet: enabled.then(|| format!("{base}SoP")),
        end_of_packet: enabled.then(|| format!("{base}EoP")),
        empty,
    })
}

fn resolve_channel(r: Resolver<'_>, base: &str, decl: &ChannelDecl) -> Result<Channel, PortError> {
    let invalid = |reason: String| PortError::InvalidChannelDescriptor {
        point: r.point().to_string(),
        reason,
    };
    let use_channel = r
        .try_flag("use channel", &decl.use_channel)?
        .ok_or_else(|| invalid(format!("use_channel '{}' is not a flag", decl.use_channel)))?;
    let max_channel = decl
        .max_channel
        .as_ref()
        .map(|raw| {
            r.try_natural("max channel", raw)?
                .ok_or_else(|| invalid(format!("max_channel '{raw}' is not a number")))
        })
        .transpose()?;

    let signal = if use_channel.value {
        let max = max_channel
            .as_ref()
            .ok_or_else(|| invalid("max_channel is required when the channel is used".into()))?
            .value;
        let width = if max > 1 { bits_for_value(max) } else { 1 };
        Some(SizedSignal::new(format!("{base}Channel"), width))
    } else {
        None
    };

    Ok(Channel {
        use_channel,
        max_channel,
        signal,
    })
}

impl Dump for StreamEndpoint {
    fn dump(&self, out: &mut Dumper) {
        out.line(format_args!("Connection Point {}: {}", self.direction, self.name));
        out.nested(|out| {
            out.line(format_args!(
                "associated clock and reset: {}, {}",
                self.clock, self.reset
            ));
            out.line(format_args!(
                "Data: '{}' width: {}, symbol width: {}, symbols per beat: {}, ready latency: {}",
                self.data,
                self.data_width,
                self.symbol_width,
                self.symbols_per_beat,
                self.ready_latency
            ));
            let hs = &self.handshake;
            let mode = hs
                .mode
                .map_or_else(|| "pending".to_string(), |m| m.to_string());
            let key = hs.key.as_deref().map(|k| format!(" ({k})")).unwrap_or_default();
            out.line(format_args!(
                "Handshake: {mode}{key}, valid: {}{}, ready: {}{}",
                or_none(&hs.valid),
                if hs.valid_terminated { " (terminated)" } else { "" },
                or_none(&hs.ready),
                if hs.ready_terminated { " (terminated)" } else { "" },
            ));
            if let Some(p) = &self.packets {
                out.line(format_args!(
                    "Packets: {}, start: {}, end: {}",
                    p.use_packets,
                    or_none(&p.start_of_packet),
                    or_none(&p.end_of_packet)
                ));
                if let Some(use_empty) = &p.use_empty {
                    out.nested(|out| match &p.empty {
                        Some(empty) => {
                            out.line(format_args!("Empty: {use_empty}, signal: {empty}"))
                        }
                        None => out.line(format_args!("Empty: {use_empty}, signal: none")),
                    });
                }
            }
            if let Some(c) = &self.channel {
                let max = c
                    .max_channel
                    .as_ref()
                    .map_or_else(|| "none".to_string(), |m| m.to_string());
                match &c.signal {
                    Some(s) => out.line(format_args!(
                        "Channel: {}, max channel: {max}, signal: {s}",
                        c.use_channel
                    )),
                    None => out.line(format_args!(
                        "Channel: {}, max channel: {max}, signal: none",
                        c.use_channel
                    )),
                }
            }
            if let Some(e) = &self.error {
                out.line(format_args!("Error: {} width: {}", e.name, e.width));
                if !e.descriptors.is_empty() {
                    let descriptors = e.descriptors.join(" ");
                    out.nested(|out| out.line(format_args!("descriptors: {descriptors}")));
                }
            }
        });
    }
}
