//! Unit tests for bit-field extraction, bool coercion and range checking

use crate::common::create_tree;
use rudp_regmap::{Error, ValueType};

const CONTINUOUS_MODE: [&str; 3] = ["App", "AppTx0", "ContinuousMode"];

#[test]
fn bool_register_round_trips() {
    let (mut tree, _) = create_tree(false);

    tree.write_bool(&CONTINUOUS_MODE, true).unwrap();
    assert!(tree.read_bool(&CONTINUOUS_MODE).unwrap());

    tree.write_bool(&CONTINUOUS_MODE, false).unwrap();
    assert!(!tree.read_bool(&CONTINUOUS_MODE).unwrap());
}

#[test]
fn one_bit_register_rejects_out_of_range_raw_write() {
    let (mut tree, _) = create_tree(false);

    let err = tree.write(&CONTINUOUS_MODE, 2).unwrap_err();
    assert_eq!(err, Error::Range { value: 2, max: 1 });
}

#[test]
fn typed_access_requires_bool_value_type() {
    let (mut tree, _) = create_tree(false);

    let path = ["App", "AppTx0", "FrameSize"];
    assert_eq!(
        tree.read_bool(&path).unwrap_err(),
        Error::Type(ValueType::UnsignedInt)
    );
    assert_eq!(
        tree.write_bool(&path, true).unwrap_err(),
        Error::Type(ValueType::UnsignedInt)
    );
}

#[test]
fn sub_word_write_preserves_neighboring_bits() {
    let (mut tree, transport) = create_tree(false);

    // ContinuousMode is bit 0 of the byte at 0x8000_0010.
    transport.poke(0x8000_0010, &[0xFE]);
    tree.write_bool(&CONTINUOUS_MODE, true).unwrap();
    assert_eq!(transport.peek(0x8000_0010, 1), vec![0xFF]);

    tree.write_bool(&CONTINUOUS_MODE, false).unwrap();
    assert_eq!(transport.peek(0x8000_0010, 1), vec![0xFE]);
}

#[test]
fn one_bit_read_masks_surrounding_bits() {
    let (mut tree, transport) = create_tree(false);

    // Bit 0 clear, bit 1 set: the field reads false.
    transport.poke(0x8000_0010, &[0x02]);
    assert!(!tree.read_bool(&CONTINUOUS_MODE).unwrap());
    assert_eq!(tree.read(&CONTINUOUS_MODE).unwrap(), 0);
}

#[test]
fn bit_offset_field_extracts_shifted_value() {
    let (mut tree, transport) = create_tree(false);

    // SysMon Temperature: 12 bits at bit offset 4 of the word at 0x0001_0400.
    transport.poke(0x0001_0400, &[0xF4, 0x7F]);
    assert_eq!(tree.read(&["Core", "SysMon", "Temperature"]).unwrap(), 0x7FF);
}

#[test]
fn wide_register_range_enforced() {
    let (mut tree, _) = create_tree(false);

    let path = ["Core", "TenGigEth", "MacAddress"];
    tree.write(&path, 0xAABB_CCDD_EEFF).unwrap();
    assert_eq!(tree.read(&path).unwrap(), 0xAABB_CCDD_EEFF);

    let err = tree.write(&path, 1 << 48).unwrap_err();
    assert_eq!(
        err,
        Error::Range {
            value: 1 << 48,
            max: (1 << 48) - 1,
        }
    );
}
