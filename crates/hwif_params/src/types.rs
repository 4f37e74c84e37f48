//! Parameter kinds, values, and declarations.

use std::fmt;

use hwif_common::{is_digit_string, Dump, Dumper, RawValue};
use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// The kind of a parameter, fixing how its values are converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    /// A non-negative integer.
    Natural,
    /// A boolean flag.
    Boolean,
    /// Free text.
    String,
    /// A cosmetic section marker that groups the following parameters.
    Section,
}

impl ParamKind {
    /// Looks up a kind by its declaration name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "natural" => Some(ParamKind::Natural),
            "boolean" => Some(ParamKind::Boolean),
            "string" => Some(ParamKind::String),
            "section" => Some(ParamKind::Section),
            _ => None,
        }
    }

    /// Converts a raw declaration or host value into a typed value of this kind.
    ///
    /// Naturals accept integers and digit strings. Booleans accept booleans,
    /// `0`/`1`, and strings (only `true`, in any case, is true). Strings accept
    /// any scalar. Sections carry no value.
    pub fn convert(self, name: &str, raw: &RawValue) -> Result<ParamValue, ParamError> {
        let invalid = || ParamError::InvalidValue {
            name: name.to_string(),
            kind: self.to_string(),
            value: raw.to_string(),
        };
        match self {
            ParamKind::Natural => match raw {
                RawValue::Int(n) => Ok(ParamValue::Natural(*n)),
                RawValue::Str(s) if is_digit_string(s.trim()) => s
                    .trim()
                    .parse()
                    .map(ParamValue::Natural)
                    .map_err(|_| invalid()),
                _ => Err(invalid()),
            },
            ParamKind::Boolean => match raw {
                RawValue::Bool(b) => Ok(ParamValue::Boolean(*b)),
                RawValue::Int(0) => Ok(ParamValue::Boolean(false)),
                RawValue::Int(1) => Ok(ParamValue::Boolean(true)),
                RawValue::Int(_) => Err(invalid()),
                RawValue::Str(s) => Ok(ParamValue::Boolean(s.trim().eq_ignore_ascii_case("true"))),
            },
            ParamKind::String => Ok(ParamValue::String(raw.to_string())),
            ParamKind::Section => Err(invalid()),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamKind::Natural => "Natural",
            ParamKind::Boolean => "Boolean",
            ParamKind::String => "String",
            ParamKind::Section => "Section",
        })
    }
}

/// The current, typed value of a parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ParamValue {
    /// A natural number.
    Natural(u64),
    /// A boolean flag.
    Boolean(bool),
    /// Free text.
    String(String),
    /// No value (section markers).
    None,
}

impl ParamValue {
    /// Returns the value as a natural number, if it is one.
    pub fn as_natural(&self) -> Option<u64> {
        match self {
            ParamValue::Natural(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as text, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&RawValue> for ParamValue {
    fn from(raw: &RawValue) -> Self {
        match raw {
            RawValue::Bool(b) => ParamValue::Boolean(*b),
            RawValue::Int(n) => ParamValue::Natural(*n),
            RawValue::Str(s) => ParamValue::String(s.clone()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Natural(n) => write!(f, "{n}"),
            ParamValue::Boolean(b) => write!(f, "{b}"),
            ParamValue::String(s) => write!(f, "\"{s}\""),
            ParamValue::None => f.write_str("-"),
        }
    }
}

/// Allowed-range metadata attached to a parameter.
///
/// Carried for display and downstream tooling; values are not checked against it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AllowedRange {
    /// An explicit list of permitted values.
    List(Vec<RawValue>),
    /// A free-form range expression such as `"12 : 36"`.
    Text(String),
}

impl fmt::Display for AllowedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowedRange::List(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            AllowedRange::Text(text) => f.write_str(text),
        }
    }
}

/// A single parameter in the table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Parameter {
    /// The unique parameter name.
    pub name: String,
    /// The parameter kind.
    pub kind: ParamKind,
    /// Optional allowed-range metadata.
    pub allowed: Option<AllowedRange>,
    /// Optional unit label (e.g. "bits").
    pub units: Option<String>,
    /// Optional human-readable description.
    pub description: Option<String>,
    /// Whether the value is supplied later by an external host.
    pub derived: bool,
    pub(crate) value: ParamValue,
    pub(crate) consumed: bool,
    pub(crate) supplied: bool,
}

impl Parameter {
    /// Returns the current value.
    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    /// Returns `true` once a resolver has read this derived parameter.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Returns `true` once the host has supplied a value for this derived
    /// parameter. Always `false` for parameters fixed at authoring time.
    pub fn is_supplied(&self) -> bool {
        self.supplied
    }
}

impl Dump for Parameter {
    fn dump(&self, out: &mut Dumper) {
        if self.kind == ParamKind::Section {
            out.line(format_args!("Section: {}", self.name));
            return;
        }
        let mut line = format!("Parameter: {} : {} := {}", self.name, self.kind, self.value);
        if let Some(allowed) = &self.allowed {
            line.push_str(&format!(", allowed range: {allowed}"));
        }
        if let Some(units) = &self.units {
            line.push_str(&format!(", units: {units}"));
        }
        if let Some(description) = &self.description {
            line.push_str(&format!(", description: {description}"));
        }
        if self.derived {
            line.push_str(if self.consumed {
                ", derived (consumed)"
            } else {
                ", derived"
            });
        }
        out.line(line);
    }
}

/// A parameter declaration as written in an interface description.
///
/// Only `name` and `kind` are required; every other field defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ParameterDecl {
    /// The parameter name.
    pub name: String,
    /// The kind name: `Natural`, `Boolean`, `String` or `Section`.
    pub kind: String,
    /// The initial value (required for every kind except `Section`).
    #[serde(default)]
    pub value: Option<RawValue>,
    /// Optional allowed-range metadata.
    #[serde(default)]
    pub allowed: Option<AllowedRange>,
    /// Optional unit label.
    #[serde(default)]
    pub units: Option<String>,
    /// Optional human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the value is supplied later by an external host.
    #[serde(default)]
    pub derived: bool,
}

impl ParameterDecl {
    /// Creates a declaration with the given kind name and initial value.
    pub fn new(name: impl Into<String>, kind: impl Into<String>, value: RawValue) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            value: Some(value),
            allowed: None,
            units: None,
            description: None,
            derived: false,
        }
    }

    /// Declares a natural-number parameter.
    pub fn natural(name: impl Into<String>, value: u64) -> Self {
        Self::new(name, "Natural", RawValue::Int(value))
    }

    /// Declares a boolean parameter.
    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, "Boolean", RawValue::Bool(value))
    }

    /// Declares a string parameter.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, "String", RawValue::Str(value.into()))
    }

    /// Declares a section marker.
    pub fn section(name: impl Into<String>) -> Self {
        Self {
            value: None,
            ..Self::new(name, "Section", RawValue::Bool(false))
        }
    }

    /// Attaches allowed-range metadata.
    pub fn with_allowed(mut self, allowed: AllowedRange) -> Self {
        self.allowed = Some(allowed);
        self
    }

    /// Attaches a unit label.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Attaches a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the parameter as supplied later by an external host.
    pub fn derived(mut self) -> Self {
        self.derived = true;
        self
    }
}
