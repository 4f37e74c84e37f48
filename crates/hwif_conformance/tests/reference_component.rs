//! Resolution of the reference component, point by point.

use hwif_common::Frequency;
use hwif_conformance::{memory_mapped, resolve_test_qsys, stream};
use hwif_params::ParamValue;
use hwif_ports::{
    ConnectionPoint, ConnectionPointKind, HandshakeMode, MemoryMappedRole, Resolved,
    SignalDirection, SizedSignal, SynchronousEdges,
};

#[test]
fn every_point_resolves_in_declaration_order() {
    let iface = resolve_test_qsys().unwrap();
    assert_eq!(iface.component.name, "testQsys");
    assert_eq!(iface.parameters.len(), 36);
    let names: Vec<_> = iface.connection_points.iter().map(|p| p.name()).collect();
    assert_eq!(
        names,
        vec![
            "Clk", "Reset", "In0", "In1", "In2", "In3", "In4", "In5", "In6", "In7", "In8", "In9",
            "ClkOut", "ResetOut", "Out0", "Out1", "Out2", "ClkMMS", "ResetMMS", "csr", "csr2",
            "csr3", "csr4", "ClkMMM", "ResetMMM", "mmm", "Sequence",
        ]
    );
}

#[test]
fn section_markers_carry_no_value() {
    let iface = resolve_test_qsys().unwrap();
    let section = iface.parameters.get("Memory Mapped").unwrap();
    assert_eq!(section.value(), &ParamValue::None);
}

#[test]
fn clocks_and_resets() {
    let iface = resolve_test_qsys().unwrap();
    match iface.connection_points.get("ClkOut") {
        Some(ConnectionPoint::Clock(c)) => assert_eq!(c.rate, Frequency::from_hz(100_000_000)),
        other => panic!("expected clock, got {other:?}"),
    }
    match iface.connection_points.get("ResetOut") {
        Some(ConnectionPoint::Reset(r)) => {
            assert_eq!(r.clock, "ClkOut");
            assert_eq!(r.edges, Some(SynchronousEdges::None));
        }
        other => panic!("expected reset, got {other:?}"),
    }
    match iface.connection_points.get("Clk") {
        Some(ConnectionPoint::Clock(c)) => assert!(c.rate.is_unspecified()),
        other => panic!("expected clock, got {other:?}"),
    }
}

#[test]
fn minimal_sink_is_fully_symbolic() {
    let iface = resolve_test_qsys().unwrap();
    let in0 = stream(&iface, "In0").unwrap();
    assert_eq!(in0.data, "D0PayLoad");
    assert_eq!(in0.data_width, Resolved::symbolic(12, "WIDTH_D"));
    assert_eq!(in0.symbol_width, Resolved::symbolic(12, "WIDTH_D"));
    assert_eq!(in0.ready_latency, 0);
    assert!(in0.packets.is_none());
}

#[test]
fn empty_signal_widths() {
    let iface = resolve_test_qsys().unwrap();
    let points = &iface.connection_points;
    assert_eq!(points.width_of_empty_signal("In1"), None);
    assert_eq!(points.width_of_empty_signal("In2"), Some(2));
    assert_eq!(points.width_of_empty_signal("In3"), Some(1));
    assert_eq!(points.width_of_empty_signal("In5"), Some(2));
    assert_eq!(points.width_of_empty_signal("In8"), Some(1));
    assert_eq!(points.width_of_empty_signal("Out2"), Some(1));
    assert_eq!(points.width_of_empty_signal("csr"), None);
}

#[test]
fn channel_signal_widths() {
    let iface = resolve_test_qsys().unwrap();
    let points = &iface.connection_points;
    assert_eq!(points.width_of_channel_signal("In4"), Some(2));
    assert_eq!(points.width_of_channel_signal("In5"), Some(2));
    assert_eq!(points.width_of_channel_signal("Out2"), Some(2));
    assert_eq!(points.width_of_channel_signal("In0"), None);
}

#[test]
fn handshake_variants() {
    let iface = resolve_test_qsys().unwrap();
    let in6 = stream(&iface, "In6").unwrap();
    assert_eq!(in6.handshake.ready, None);
    assert_eq!(in6.handshake.valid.as_deref(), Some("D6Valid"));

    let in7 = stream(&iface, "In7").unwrap();
    assert_eq!(in7.handshake.valid, None);
    assert_eq!(in7.handshake.ready.as_deref(), Some("D7Ready"));

    let in9 = stream(&iface, "In9").unwrap();
    assert_eq!(in9.handshake.mode, Some(HandshakeMode::NoBackpressure));
    assert_eq!(in9.handshake.key.as_deref(), Some("HANDSHAKE_D9"));
    assert!(in9.handshake.ready_terminated);
}

#[test]
fn error_signals() {
    let iface = resolve_test_qsys().unwrap();
    let out1 = stream(&iface, "Out1").unwrap();
    let e = out1.error.as_ref().unwrap();
    assert_eq!(e.name, "Q1Error");
    assert_eq!(e.width, Resolved::symbolic(2, "Q1_WIDTH_ERROR"));

    let out2 = stream(&iface, "Out2").unwrap();
    assert_eq!(out2.error.as_ref().unwrap().descriptors, vec!["one", "two"]);
    assert_eq!(out2.symbols_per_beat, 2);
}

#[test]
fn memory_mapped_slave() {
    let iface = resolve_test_qsys().unwrap();
    let csr = memory_mapped(&iface, "csr").unwrap();
    assert_eq!(csr.role, MemoryMappedRole::Slave);
    assert_eq!(csr.width_burst_count(), Some(4));
    assert_eq!(csr.width_byte_enable(), Some(1));
    let rd = csr.read.as_ref().unwrap();
    assert_eq!(rd.latency, Resolved::symbolic(1, "READ_LATENCY"));
    assert_eq!(csr.wait_request.as_deref(), Some("WaitRequestS"));
    assert_eq!(csr.bridges_to_master.as_ref().map(|b| b.value), Some(false));

    let csr2 = memory_mapped(&iface, "csr2").unwrap();
    assert_eq!(csr2.read.as_ref().unwrap().wait_time, Resolved::immediate(1));
    assert_eq!(csr2.write.as_ref().unwrap().symbol_width, Resolved::immediate(8));

    assert!(memory_mapped(&iface, "csr3").unwrap().read.is_none());
    assert!(memory_mapped(&iface, "csr4").unwrap().write.is_none());
}

#[test]
fn memory_mapped_master() {
    let iface = resolve_test_qsys().unwrap();
    let mmm = memory_mapped(&iface, "mmm").unwrap();
    assert_eq!(iface.connection_points.get("mmm").unwrap().kind(), ConnectionPointKind::MMMaster);
    assert_eq!(mmm.width_burst_count(), Some(2));
    assert_eq!(mmm.width_byte_enable(), Some(4));
    assert_eq!(
        mmm.write.as_ref().unwrap().byte_enable,
        Some(SizedSignal::new("ByteEnableM", 4))
    );
    assert_eq!(mmm.bridges_to_master, None);
}

#[test]
fn conduit_signals() {
    let iface = resolve_test_qsys().unwrap();
    match iface.connection_points.get("Sequence") {
        Some(ConnectionPoint::Conduit(c)) => {
            assert_eq!(c.clock.as_deref(), Some("ClkOut"));
            assert_eq!(c.signals[0].direction, SignalDirection::Input);
            assert_eq!(c.signals[0].width, Resolved::symbolic(8, "WIDTH_SEQUENCE_ID"));
            assert_eq!(c.signals[1].width, Resolved::immediate(16));
        }
        other => panic!("expected conduit, got {other:?}"),
    }
}

#[test]
fn bindings_mark_first_use_of_derived_parameters() {
    let mut iface = resolve_test_qsys().unwrap();
    let bindings = iface.elaborate().unwrap();
    let first: Vec<_> = bindings
        .iter()
        .filter(|b| b.first_use)
        .map(|b| (b.point.as_str(), b.parameter.as_str()))
        .collect();
    assert_eq!(first, vec![("In3", "USE_PACKETS_D3"), ("Sequence", "WIDTH_SEQUENCE_ID")]);
    assert!(bindings.iter().any(|b| b.point == "csr" && b.parameter == "BRIDGES_TO_MASTER"));
    assert!(!bindings.iter().any(|b| b.point == "In8"));
}
