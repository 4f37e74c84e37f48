//! Typed representation of an `interface.toml` description.

use std::collections::BTreeMap;

use hwif_common::RawValue;
use hwif_params::ParameterDecl;
use hwif_ports::ConnectionPointDecl;
use serde::{Deserialize, Serialize};

/// Identity of the described component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMeta {
    /// The component name.
    pub name: String,
    /// Optional version string.
    #[serde(default)]
    pub version: String,
    /// Optional human description.
    #[serde(default)]
    pub description: String,
}

/// The document as written: connection points are still untyped tables,
/// decoded by tag in the loader.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDescription {
    pub component: ComponentMeta,
    #[serde(default)]
    pub parameter: Vec<ParameterDecl>,
    #[serde(default)]
    pub connection_point: Vec<toml::Table>,
    #[serde(default)]
    pub overrides: BTreeMap<String, RawValue>,
}

/// A decoded, validated interface description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescription {
    /// The component header.
    pub component: ComponentMeta,
    /// Parameter declarations, in order.
    pub parameters: Vec<ParameterDecl>,
    /// Connection-point declarations, in order.
    pub connection_points: Vec<ConnectionPointDecl>,
    /// Overrides applied to the parameter table before resolution.
    pub overrides: BTreeMap<String, RawValue>,
}
