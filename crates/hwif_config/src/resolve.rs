//! Resolution of a description into a complete interface model.

use hwif_common::{ContentHash, Dump, Dumper, RawValue};
use hwif_params::ParameterTable;
use hwif_ports::{ConnectionPoints, DeferredBinding};
use serde::Serialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::types::{ComponentMeta, InterfaceDescription};

/// A fully resolved interface: the parameter table and every connection
/// point resolved against it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedInterface {
    /// The component header.
    pub component: ComponentMeta,
    /// The parameter table after all overrides.
    pub parameters: ParameterTable,
    /// The resolved connection points.
    pub connection_points: ConnectionPoints,
}

impl ResolvedInterface {
    /// Resolves a description.
    ///
    /// The table is built first, then the description's own `[overrides]` and
    /// then `overrides` from the host are applied, and only then are the
    /// connection points resolved.
    pub fn resolve<K: AsRef<str>>(
        description: &InterfaceDescription,
        overrides: impl IntoIterator<Item = (K, RawValue)>,
    ) -> Result<Self, ConfigError> {
        let mut parameters = ParameterTable::from_decls(description.parameters.iter().cloned())?;
        parameters.apply_overrides(
            description
                .overrides
                .iter()
                .map(|(name, value)| (name.as_str(), value.clone())),
        )?;
        parameters.apply_overrides(overrides)?;
        let connection_points = ConnectionPoints::from_decls(
            &parameters,
            description.connection_points.iter().cloned(),
        )?;
        debug!(
            component = %description.component.name,
            parameters = parameters.len(),
            connection_points = connection_points.len(),
            "interface resolved"
        );
        Ok(Self {
            component: description.component.clone(),
            parameters,
            connection_points,
        })
    }

    /// Applies host overrides and re-resolves every connection point.
    ///
    /// On error nothing changes.
    pub fn update<K: AsRef<str>>(
        &mut self,
        overrides: impl IntoIterator<Item = (K, RawValue)>,
    ) -> Result<(), ConfigError> {
        let mut parameters = self.parameters.clone();
        parameters.apply_overrides(overrides)?;
        let mut connection_points = self.connection_points.clone();
        connection_points.refresh(&parameters)?;
        self.parameters = parameters;
        self.connection_points = connection_points;
        Ok(())
    }

    /// Re-resolves against the current table and returns the deferred
    /// bindings, marking derived parameters as consumed.
    pub fn elaborate(&mut self) -> Result<Vec<DeferredBinding>, ConfigError> {
        Ok(self.connection_points.elaborate(&mut self.parameters)?)
    }

    /// Renders every attribute of the model as indented text.
    pub fn dump(&self) -> String {
        self.dump_to_string()
    }

    /// A content hash of the resolved model.
    pub fn fingerprint(&self) -> Result<ContentHash, ConfigError> {
        Ok(ContentHash::of(self)?)
    }
}

impl Dump for ResolvedInterface {
    fn dump(&self, out: &mut Dumper) {
        if self.component.version.is_empty() {
            out.line(format_args!("Component: {}", self.component.name));
        } else {
            out.line(format_args!(
                "Component: {} version {}",
                self.component.name, self.component.version
            ));
        }
        if !self.component.description.is_empty() {
            out.nested(|out| out.line(&self.component.description));
        }
        out.blank();
        self.parameters.dump(out);
        out.blank();
        self.connection_points.dump(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_description_from_str;
    use hwif_ports::PortError;

    const DESCRIPTION: &str = r#"
[component]
name = "demo"
version = "2.1"
description = "two streams"

[[parameter]]
name = "WIDTH_D"
kind = "Natural"
value = 16

[[parameter]]
name = "WIDTH_SYMBOL"
kind = "Natural"
value = 8
derived = true

[[parameter]]
name = "USE_EMPTY"
kind = "Boolean"
value = true

[[connection_point]]
kind = "ClockReset"
clock = "Clk"
reset = "Reset"

[[connection_point]]
kind = "Sink"
name = "In0"
clock = "Clk"
reset = "Reset"
data = { name = "D0", width = "WIDTH_D", symbol_width = "WIDTH_SYMBOL" }
packets = { use_packets = true, use_empty = "USE_EMPTY" }

[[connection_point]]
kind = "Source"
name = "Out0"
clock = "Clk"
reset = "Reset"
data = { name = "Q0", width = 32 }
"#;

    fn no_overrides() -> Vec<(String, RawValue)> {
        Vec::new()
    }

    #[test]
    fn resolve_description() {
        let desc = load_description_from_str(DESCRIPTION).unwrap();
        let iface = ResolvedInterface::resolve(&desc, no_overrides()).unwrap();
        assert_eq!(iface.parameters.len(), 3);
        assert_eq!(iface.connection_points.len(), 4);
        assert_eq!(iface.connection_points.width_of_empty_signal("In0"), Some(1));
    }

    #[test]
    fn description_overrides_then_host_overrides() {
        let text = format!("{DESCRIPTION}\n[overrides]\nWIDTH_D = \"32\"\n");
        let desc = load_description_from_str(&text).unwrap();
        let iface = ResolvedInterface::resolve(&desc, no_overrides()).unwrap();
        assert_eq!(iface.connection_points.width_of_empty_signal("In0"), Some(2));

        let iface = ResolvedInterface::resolve(&desc, [("WIDTH_D", RawValue::Int(64))]).unwrap();
        assert_eq!(iface.connection_points.width_of_empty_signal("In0"), Some(3));
    }

    #[test]
    fn override_of_unknown_parameter_errors() {
        let desc = load_description_from_str(DESCRIPTION).unwrap();
        let err = ResolvedInterface::resolve(&desc, [("NOPE", RawValue::Int(1))]).unwrap_err();
        assert!(matches!(err, ConfigError::Parameter(_)));
    }

    #[test]
    fn update_refreshes_points() {
        let desc = load_description_from_str(DESCRIPTION).unwrap();
        let mut iface = ResolvedInterface::resolve(&desc, no_overrides()).unwrap();
        let before = iface.fingerprint().unwrap();
        iface.update([("USE_EMPTY", RawValue::Bool(false))]).unwrap();
        assert_eq!(iface.connection_points.width_of_empty_signal("In0"), None);
        assert_ne!(iface.fingerprint().unwrap(), before);
    }

    #[test]
    fn failed_update_changes_nothing() {
        let desc = load_description_from_str(DESCRIPTION).unwrap();
        let mut iface = ResolvedInterface::resolve(&desc, no_overrides()).unwrap();
        let before = iface.clone();
        let err = iface.update([("WIDTH_SYMBOL", RawValue::Int(5))]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ConnectionPoint(PortError::NonIntegralSymbolCount { .. })
        ));
        assert_eq!(iface, before);
    }

    #[test]
    fn elaborate_reports_derived_first_use() {
        let desc = load_description_from_str(DESCRIPTION).unwrap();
        let mut iface = ResolvedInterface::resolve(&desc, no_overrides()).unwrap();
        let bindings = iface.elaborate().unwrap();
        let derived: Vec<_> = bindings.iter().filter(|b| b.first_use).collect();
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].parameter, "WIDTH_SYMBOL");
        assert!(iface.parameters.get("WIDTH_SYMBOL").unwrap().is_consumed());
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let desc = load_description_from_str(DESCRIPTION).unwrap();
        let a = ResolvedInterface::resolve(&desc, no_overrides()).unwrap();
        let b = ResolvedInterface::resolve(&desc, no_overrides()).unwrap();
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn dump_has_header_parameters_then_points() {
        let desc = load_description_from_str(DESCRIPTION).unwrap();
        let text = ResolvedInterface::resolve(&desc, no_overrides()).unwrap().dump();
        assert!(text.starts_with("Component: demo version 2.1\n    two streams\n\nParameters\n"));
        let params_at = text.find("Parameters").unwrap();
        let points_at = text.find("Connection Points").unwrap();
        assert!(params_at < points_at);
        assert!(text.contains("Connection Point Sink: In0"));
    }
}
