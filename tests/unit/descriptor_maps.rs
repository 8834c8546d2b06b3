//! Unit tests for the shipped descriptor content of the example design

use core::time::Duration;

use crate::common::create_tree;
use rudp_regmap::{blocks, AccessMode, ValueType};

#[test]
fn both_configurations_validate() {
    // Construction runs the overlap/span/geometry checks over every
    // descriptor in the repository.
    assert!(blocks::root(false).is_ok());
    assert!(blocks::root(true).is_ok());
}

#[test]
fn app_tx_register_layout() {
    let (tree, _) = create_tree(false);

    let expected: [(&str, u64); 5] = [
        ("FrameSize", 0x000),
        ("SendFrame", 0x004),
        ("FrameCnt", 0x008),
        ("WordCnt", 0x00C),
        ("ContinuousMode", 0x010),
    ];
    for (name, offset) in expected {
        let reg = tree.register(&["App", "AppTx0", name]).unwrap();
        assert_eq!(reg.offset(), offset, "{name}");
        assert!(reg.byte_size() <= 4, "{name}");
        assert!(!reg.description().is_empty(), "{name}");
    }

    let frame_cnt = tree.register(&["App", "AppTx0", "FrameCnt"]).unwrap();
    assert_eq!(frame_cnt.mode(), AccessMode::ReadOnly);
    assert_eq!(frame_cnt.poll_interval(), Some(Duration::from_secs(1)));

    let send_frame = tree.register(&["App", "AppTx0", "SendFrame"]).unwrap();
    assert_eq!(send_frame.mode(), AccessMode::WriteOnly);
    assert_eq!(send_frame.poll_interval(), None);

    let continuous = tree.register(&["App", "AppTx0", "ContinuousMode"]).unwrap();
    assert_eq!(continuous.bit_size(), 1);
    assert_eq!(continuous.value_type(), ValueType::Bool);
}

#[test]
fn axi_version_identity_surface() {
    let (tree, _) = create_tree(true);

    let scratch = tree.register(&["Core", "AxiVersion", "ScratchPad"]).unwrap();
    assert_eq!(scratch.mode(), AccessMode::ReadWrite);
    assert_eq!(scratch.poll_interval(), None);

    let uptime = tree.register(&["Core", "AxiVersion", "UpTimeCnt"]).unwrap();
    assert_eq!(uptime.mode(), AccessMode::ReadOnly);
    assert_eq!(uptime.poll_interval(), Some(Duration::from_secs(1)));

    let dna = tree.register(&["Core", "AxiVersion", "DnaValue"]).unwrap();
    assert_eq!(dna.bit_size(), 64);
}

#[test]
fn sysmon_fields_sit_above_bit_offset_four() {
    let (tree, _) = create_tree(false);

    for name in ["Temperature", "VccInt", "VccAux", "VccBram"] {
        let reg = tree.register(&["Core", "SysMon", name]).unwrap();
        assert_eq!(reg.bit_offset(), 4, "{name}");
        assert_eq!(reg.bit_size(), 12, "{name}");
        assert_eq!(reg.mode(), AccessMode::ReadOnly, "{name}");
    }
}

#[test]
fn udp_engine_has_two_server_slots() {
    let (tree, _) = create_tree(false);

    assert!(tree.register(&["Core", "UdpEngine", "Server[0]", "RemotePort"]).is_ok());
    assert!(tree.register(&["Core", "UdpEngine", "Server[1]", "RemotePort"]).is_ok());
    assert!(tree.register(&["Core", "UdpEngine", "Server[2]", "RemotePort"]).is_err());
}

#[test]
fn sim_flag_gates_exactly_the_hardware_blocks() {
    let (tree, _) = create_tree(true);
    let root = tree.root();
    let core = match root.child("Core").unwrap() {
        rudp_regmap::Node::Device(d) => d,
        _ => panic!("Core must be a device"),
    };

    for node in core.children() {
        if let rudp_regmap::Node::Device(d) = node {
            let expect_enabled = d.name() == "AxiVersion";
            assert_eq!(d.enabled(), expect_enabled, "{}", d.name());
        }
    }

    match root.child("App").unwrap() {
        rudp_regmap::Node::Device(d) => assert!(d.enabled()),
        _ => panic!("App must be a device"),
    }
}
