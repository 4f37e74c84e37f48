//! Signal-level building blocks shared by the connection-point records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named signal with a resolved bit width.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SizedSignal {
    /// The signal name.
    pub name: String,
    /// The width in bits.
    pub width: u32,
}

impl SizedSignal {
    /// Creates a signal.
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

impl fmt::Display for SizedSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} bits]", self.name, self.width)
    }
}

/// Direction of a conduit signal as seen from the described module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalDirection {
    /// Driven into the module.
    Input,
    /// Driven by the module.
    Output,
    /// Bidirectional.
    Bidir,
}

impl SignalDirection {
    /// Looks up a direction by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "input" | "in" => Some(SignalDirection::Input),
            "output" | "out" => Some(SignalDirection::Output),
            "bidir" | "inout" => Some(SignalDirection::Bidir),
            _ => None,
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignalDirection::Input => "Input",
            SignalDirection::Output => "Output",
            SignalDirection::Bidir => "Bidir",
        })
    }
}

/// Renders an optional signal name for dumps.
pub(crate) fn or_none(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or("none")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_names() {
        assert_eq!(SignalDirection::from_name("Input"), Some(SignalDirection::Input));
        assert_eq!(SignalDirection::from_name("OUTPUT"), Some(SignalDirection::Output));
        assert_eq!(SignalDirection::from_name("inout"), Some(SignalDirection::Bidir));
        assert_eq!(SignalDirection::from_name("sideways"), None);
    }

    #[test]
    fn sized_signal_display() {
        assert_eq!(SizedSignal::new("D3Empty", 1).to_string(), "D3Empty [1 bits]");
    }
}
