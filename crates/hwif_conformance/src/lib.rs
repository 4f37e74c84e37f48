//! Conformance test helpers for hwif.
//!
//! Provides the reference component description and shared functions that run
//! a description through the full load → resolve pipeline for assertion in
//! integration tests.

#![warn(missing_docs)]

use std::path::Path;

use hwif_common::RawValue;
use hwif_config::{
    load_description, load_description_from_str, ConfigError, ResolvedInterface, DESCRIPTION_FILE,
};
use hwif_ports::{MemoryMappedPort, StreamEndpoint};

/// The reference component: every connection-point kind, symbolic and
/// literal fields, derived parameters, and section markers.
pub const TEST_QSYS: &str = include_str!("../fixtures/test_qsys.toml");

/// Loads and resolves description text with the given host overrides.
pub fn resolve_str<K: AsRef<str>>(
    text: &str,
    overrides: impl IntoIterator<Item = (K, RawValue)>,
) -> Result<ResolvedInterface, ConfigError> {
    let description = load_description_from_str(text)?;
    ResolvedInterface::resolve(&description, overrides)
}

/// Resolves the reference component without overrides.
pub fn resolve_test_qsys() -> Result<ResolvedInterface, ConfigError> {
    resolve_str(TEST_QSYS, Vec::<(String, RawValue)>::new())
}

/// Writes `text` as the description file of a component directory.
pub fn write_component(dir: &Path, text: &str) -> std::io::Result<()> {
    std::fs::write(dir.join(DESCRIPTION_FILE), text)
}

/// Loads and resolves the description in a component directory.
pub fn resolve_dir(dir: &Path) -> Result<ResolvedInterface, ConfigError> {
    let description = load_description(dir)?;
    ResolvedInterface::resolve(&description, Vec::<(String, RawValue)>::new())
}

/// Returns the named stream endpoint, if the point exists and is one.
pub fn stream<'a>(iface: &'a ResolvedInterface, name: &str) -> Option<&'a StreamEndpoint> {
    iface.connection_points.get(name)?.as_stream()
}

/// Returns the named memory-mapped port, if the point exists and is one.
pub fn memory_mapped<'a>(iface: &'a ResolvedInterface, name: &str) -> Option<&'a MemoryMappedPort> {
    iface.connection_points.get(name)?.as_memory_mapped()
}
