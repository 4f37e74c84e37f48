//! Description file loading, connection-point decoding and validation.

use std::path::Path;

use hwif_ports::{ConnectionPointDecl, ConnectionPointKind};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ConfigError;
use crate::types::{InterfaceDescription, RawDescription};

/// The description file name inside a component directory.
pub const DESCRIPTION_FILE: &str = "interface.toml";

/// Loads and validates `interface.toml` from a component directory.
pub fn load_description(component_dir: &Path) -> Result<InterfaceDescription, ConfigError> {
    let path = component_dir.join(DESCRIPTION_FILE);
    let content = std::fs::read_to_string(&path)?;
    debug!(path = %path.display(), "loading interface description");
    load_description_from_str(&content)
}

/// Parses and validates an interface description from a string.
pub fn load_description_from_str(content: &str) -> Result<InterfaceDescription, ConfigError> {
    let raw: RawDescription =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    let connection_points = raw
        .connection_point
        .into_iter()
        .enumerate()
        .map(|(index, table)| decode_connection_point(index, table))
        .collect::<Result<Vec<_>, _>>()?;
    let description = InterfaceDescription {
        component: raw.component,
        parameters: raw.parameter,
        connection_points,
        overrides: raw.overrides,
    };
    validate_description(&description)?;
    Ok(description)
}

/// Decodes one `[[connection_point]]` table by its `kind` tag.
///
/// The tag is dispatched explicitly so an unknown kind surfaces as
/// [`PortError::UnknownConnectionPointKind`](hwif_ports::PortError::UnknownConnectionPointKind)
/// rather than a generic parse failure. `index` only labels errors.
pub fn decode_connection_point(
    index: usize,
    table: toml::Table,
) -> Result<ConnectionPointDecl, ConfigError> {
    let kind: ConnectionPointKind = match table.get("kind") {
        Some(toml::Value::String(tag)) => tag.parse()?,
        Some(other) => {
            return Err(ConfigError::ParseError(format!(
                "connection_point[{index}].kind must be a string, found {}",
                other.type_str()
            )))
        }
        None => return Err(ConfigError::MissingField(format!("connection_point[{index}].kind"))),
    };
    Ok(match kind {
        ConnectionPointKind::Clock => ConnectionPointDecl::Clock(decode(index, table)?),
        ConnectionPointKind::Reset => ConnectionPointDecl::Reset(decode(index, table)?),
        ConnectionPointKind::ClockReset => ConnectionPointDecl::ClockReset(decode(index, table)?),
        ConnectionPointKind::Sink => ConnectionPointDecl::Sink(decode(index, table)?),
        ConnectionPointKind::Source => ConnectionPointDecl::Source(decode(index, table)?),
        ConnectionPointKind::MMMaster => ConnectionPointDecl::MMMaster(decode(index, table)?),
        ConnectionPointKind::MMSlave => ConnectionPointDecl::MMSlave(decode(index, table)?),
        ConnectionPointKind::Conduit => ConnectionPointDecl::Conduit(decode(index, table)?),
    })
}

fn decode<T: DeserializeOwned>(index: usize, table: toml::Table) -> Result<T, ConfigError> {
    toml::Value::Table(table)
        .try_into()
        .map_err(|e| ConfigError::ParseError(format!("connection_point[{index}]: {e}")))
}

/// Checks that every required name is present.
fn validate_description(description: &InterfaceDescription) -> Result<(), ConfigError> {
    if description.component.name.trim().is_empty() {
        return Err(ConfigError::MissingField("component.name".to_string()));
    }
    for (index, param) in description.parameters.iter().enumerate() {
        if param.name.trim().is_empty() {
            return Err(ConfigError::MissingField(format!("parameter[{index}].name")));
        }
    }
    for (index, decl) in description.connection_points.iter().enumerate() {
        if decl.names().iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::MissingField(format!("connection_point[{index}].name")));
        }
    }
    Ok(())
}
