//! External overrides, re-resolution and round-trip determinism.

use hwif_common::RawValue;
use hwif_conformance::{resolve_str, resolve_test_qsys, stream, TEST_QSYS};
use hwif_config::ConfigError;
use hwif_params::ParamError;
use hwif_ports::{HandshakeMode, PortError};

#[test]
fn resolving_twice_is_bit_identical() {
    let a = resolve_test_qsys().unwrap();
    let b = resolve_test_qsys().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn derived_boolean_override_touches_only_its_dependents() {
    let before = resolve_test_qsys().unwrap();
    let mut after = before.clone();
    after.update([("USE_PACKETS_D3", RawValue::Bool(false))]).unwrap();

    for point in before.connection_points.iter() {
        if point.name() != "In3" {
            assert_eq!(after.connection_points.get(point.name()), Some(point), "{}", point.name());
        }
    }
    for param in before.parameters.iter() {
        if param.name != "USE_PACKETS_D3" {
            assert_eq!(after.parameters.get(&param.name).unwrap().value(), param.value());
        }
    }

    let in3 = stream(&after, "In3").unwrap();
    let packets = in3.packets.as_ref().unwrap();
    assert!(!packets.use_packets.value);
    assert_eq!(packets.start_of_packet, None);
    assert_eq!(after.connection_points.width_of_empty_signal("In3"), None);
    assert_ne!(after.fingerprint().unwrap(), before.fingerprint().unwrap());
}

#[test]
fn host_override_at_resolution_time() {
    let iface = resolve_str(TEST_QSYS, [("WIDTH_D", RawValue::from("24"))]).unwrap();
    assert_eq!(stream(&iface, "In0").unwrap().data_width.value, 24);
    assert_eq!(iface.connection_points.width_of_empty_signal("In2"), Some(3));

    let err = resolve_str(TEST_QSYS, [("WIDTH_D", RawValue::Int(16))]).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ConnectionPoint(PortError::NonIntegralSymbolCount {
            ref point,
            width: 16,
            symbol_width: 3,
        }) if point == "In2"
    ));
}

#[test]
fn update_with_same_values_keeps_fingerprint() {
    let mut iface = resolve_test_qsys().unwrap();
    let before = iface.fingerprint().unwrap();
    iface.update([("WIDTH_D", RawValue::Int(12))]).unwrap();
    assert_eq!(iface.fingerprint().unwrap(), before);
}

#[test]
fn symbol_width_override_recomputes_empty() {
    let mut iface = resolve_test_qsys().unwrap();
    iface.update([("WIDTH_SYMBOL_D3", RawValue::Int(6))]).unwrap();
    assert_eq!(iface.connection_points.width_of_empty_signal("In3"), Some(2));
    assert_eq!(stream(&iface, "In3").unwrap().symbols_per_beat, 4);
}

#[test]
fn handshake_parameter_override() {
    let mut iface = resolve_test_qsys().unwrap();
    iface.update([("HANDSHAKE_D9", RawValue::from("NO_READY"))]).unwrap();
    let in9 = stream(&iface, "In9").unwrap();
    assert_eq!(in9.handshake.ready, None);

    let err = iface
        .update([("HANDSHAKE_D9", RawValue::from("SOMETIMES"))])
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ConnectionPoint(PortError::InvalidHandshakeMode { .. })
    ));
    assert_eq!(stream(&iface, "In9").unwrap().handshake.ready, None);
}

const PENDING_HANDSHAKE: &str = r#"
[component]
name = "pending"

[[parameter]]
name = "HANDSHAKE_HOST"
kind = "String"
value = ""
derived = true

[[connection_point]]
kind = "ClockReset"
clock = "Clk"
reset = "Reset"

[[connection_point]]
kind = "Sink"
name = "In0"
clock = "Clk"
reset = "Reset"
data = { name = "D0", width = 8, handshake = "HANDSHAKE_HOST" }
"#;

#[test]
fn host_supplied_handshake_mode_is_validated() {
    let mut iface = resolve_str(PENDING_HANDSHAKE, Vec::<(String, RawValue)>::new()).unwrap();
    assert_eq!(stream(&iface, "In0").unwrap().handshake.mode, None);
    let before = iface.clone();

    let err = iface
        .update([("HANDSHAKE_HOST", RawValue::from("SIDEWAYS"))])
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ConnectionPoint(PortError::InvalidHandshakeMode { ref point, .. })
            if point == "In0"
    ));
    assert_eq!(iface, before);

    let err = resolve_str(PENDING_HANDSHAKE, [("HANDSHAKE_HOST", RawValue::from("SIDEWAYS"))])
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ConnectionPoint(PortError::InvalidHandshakeMode { .. })
    ));

    iface
        .update([("HANDSHAKE_HOST", RawValue::from("NO_FEED"))])
        .unwrap();
    iface.elaborate().unwrap();
    let in0 = stream(&iface, "In0").unwrap();
    assert_eq!(in0.handshake.mode, Some(HandshakeMode::NoFeed));
    assert!(in0.handshake.valid_terminated);
}

#[test]
fn host_supplied_flag_must_fit_kind() {
    let mut iface = resolve_test_qsys().unwrap();
    let err = iface
        .update([("USE_PACKETS_D3", RawValue::Int(7))])
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Parameter(ParamError::InvalidValue { ref name, .. })
            if name == "USE_PACKETS_D3"
    ));
    assert!(stream(&iface, "In3").unwrap().packets.as_ref().unwrap().use_packets.value);
}

#[test]
fn override_value_must_fit_kind() {
    let mut iface = resolve_test_qsys().unwrap();
    let err = iface
        .update([("WIDTH_D", RawValue::from("wide"))])
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Parameter(ParamError::InvalidValue { .. })
    ));
}

#[test]
fn override_of_unknown_parameter_fails() {
    let mut iface = resolve_test_qsys().unwrap();
    let err = iface
        .update([("NOT_A_PARAMETER", RawValue::Int(1))])
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Parameter(ParamError::UnknownParameter(ref n)) if n == "NOT_A_PARAMETER"
    ));
}

#[test]
fn conduit_width_follows_derived_parameter() {
    let mut iface = resolve_test_qsys().unwrap();
    iface.update([("WIDTH_SEQUENCE_ID", RawValue::Int(12))]).unwrap();
    let bindings = iface.elaborate().unwrap();
    let seq = bindings
        .iter()
        .find(|b| b.point == "Sequence")
        .unwrap();
    assert_eq!(seq.field, "SequenceID");
    assert!(seq.derived);
    assert!(iface.parameters.get("WIDTH_SEQUENCE_ID").unwrap().is_consumed());
    assert!(iface.dump().contains("SequenceID : Input width: 12 (WIDTH_SEQUENCE_ID)"));
}
