//! Unit tests for the polling scheduler

use core::time::Duration;

use crate::common::create_tree;
use rudp_regmap::{PollState, Poller};

const UP_TIME: [&str; 3] = ["Core", "AxiVersion", "UpTimeCnt"];
const FRAME_CNT: [&str; 3] = ["App", "AppTx0", "FrameCnt"];
const VALID_CNT: [&str; 3] = ["Core", "FwRudpServer[0]", "ValidCnt"];

#[test]
fn sim_mode_schedules_only_enabled_registers() {
    let (tree, _) = create_tree(true);
    let poller = Poller::attach(&tree);

    // UpTimeCnt plus FrameCnt/WordCnt of the three AppTx instances.
    assert_eq!(poller.len(), 7);
    assert_eq!(poller.state(&UP_TIME), Some(PollState::Scheduled));
    assert_eq!(poller.state(&FRAME_CNT), Some(PollState::Scheduled));

    // Registers under disabled devices are never scheduled.
    assert_eq!(poller.state(&VALID_CNT), None);
}

#[test]
fn hardware_mode_schedules_disabled_blocks_too() {
    let (tree, _) = create_tree(false);
    let poller = Poller::attach(&tree);

    assert!(poller.len() > 7);
    assert_eq!(poller.state(&VALID_CNT), Some(PollState::Scheduled));
    assert_eq!(
        poller.state(&["Core", "AxisMon[1]", "Ch[0]", "Bandwidth"]),
        Some(PollState::Scheduled)
    );
    // Registers without a poll interval are not scheduled.
    assert_eq!(poller.state(&["Core", "AxiVersion", "ScratchPad"]), None);
}

#[test]
fn nothing_fires_before_the_interval_boundary() {
    let (mut tree, transport) = create_tree(true);
    let mut poller = Poller::attach(&tree);

    poller.tick(Duration::from_millis(500), &mut tree);
    assert_eq!(transport.read_count(), 0);

    poller.tick(Duration::from_secs(1), &mut tree);
    assert_eq!(transport.read_count(), 7);
}

#[test]
fn each_boundary_fires_once_per_register() {
    let (mut tree, transport) = create_tree(true);
    let mut poller = Poller::attach(&tree);

    poller.tick(Duration::from_secs(1), &mut tree);
    poller.tick(Duration::from_millis(1500), &mut tree);
    assert_eq!(transport.read_count(), 7);

    poller.tick(Duration::from_secs(2), &mut tree);
    assert_eq!(transport.read_count(), 14);
}

#[test]
fn late_ticks_catch_up_without_bursting() {
    let (mut tree, transport) = create_tree(true);
    let mut poller = Poller::attach(&tree);

    // Five intervals late: one read per register, re-armed past `now`.
    poller.tick(Duration::from_secs(5), &mut tree);
    assert_eq!(transport.read_count(), 7);

    poller.tick(Duration::from_secs(5), &mut tree);
    assert_eq!(transport.read_count(), 7);

    poller.tick(Duration::from_secs(6), &mut tree);
    assert_eq!(transport.read_count(), 14);
}

#[test]
fn transport_failure_marks_failed_and_retries_unchanged() {
    let (mut tree, transport) = create_tree(true);
    let mut poller = Poller::attach(&tree);

    transport.set_fail_all_reads(true);
    poller.tick(Duration::from_secs(1), &mut tree);
    assert_eq!(poller.state(&UP_TIME), Some(PollState::Failed));
    assert_eq!(poller.state(&FRAME_CNT), Some(PollState::Failed));
    assert_eq!(transport.read_count(), 7);

    // Same interval, no backoff, and the loop keeps running.
    transport.set_fail_all_reads(false);
    poller.tick(Duration::from_secs(2), &mut tree);
    assert_eq!(poller.state(&UP_TIME), Some(PollState::Scheduled));
    assert_eq!(transport.read_count(), 14);
    assert!(tree.cached(&UP_TIME).unwrap().is_some());
}

#[test]
fn poll_failure_leaves_cache_at_last_good_value() {
    let (mut tree, transport) = create_tree(true);
    let mut poller = Poller::attach(&tree);

    transport.poke(0x0000_0008, &[5, 0, 0, 0]);
    poller.tick(Duration::from_secs(1), &mut tree);
    assert_eq!(tree.cached(&UP_TIME).unwrap().unwrap().value, 5);

    transport.set_fail_all_reads(true);
    poller.tick(Duration::from_secs(2), &mut tree);
    assert_eq!(poller.state(&UP_TIME), Some(PollState::Failed));
    assert_eq!(tree.cached(&UP_TIME).unwrap().unwrap().value, 5);
}
