//! End-to-end workflow over the full example design

use core::time::Duration;

use crate::common::{create_tree, MockDelay};
use rudp_regmap::{PollState, Poller};

#[test]
fn configure_burst_and_monitor() {
    let (mut tree, transport) = create_tree(false);

    // Configure the traffic generator and fire a burst.
    tree.write(&["App", "AppTx0", "FrameSize"], 256).unwrap();
    tree.write_bool(&["App", "AppTx0", "ContinuousMode"], false).unwrap();
    tree.write(&["App", "AppTx0", "SendFrame"], 10).unwrap();

    // Firmware-side progress appears through the backdoor.
    transport.poke(0x8000_0008, &[10, 0, 0, 0]);
    assert_eq!(tree.read(&["App", "AppTx0", "FrameCnt"]).unwrap(), 10);

    // Open the first RSSI connection and watch its statistics get polled.
    tree.write_bool(&["Core", "FwRudpServer[0]", "OpenConn"], true).unwrap();
    transport.poke(0x0012_0044, &[0x40, 0x42, 0x0F, 0x00]); // ValidCnt = 1_000_000

    let mut poller = Poller::attach(&tree);
    let mut delay = MockDelay;
    poller.run_for(3, Duration::from_secs(1), &mut delay, &mut tree);

    let valid_cnt = tree
        .cached(&["Core", "FwRudpServer[0]", "ValidCnt"])
        .unwrap()
        .unwrap();
    assert_eq!(valid_cnt.value, 1_000_000);
    assert_eq!(
        poller.state(&["Core", "FwRudpServer[0]", "ValidCnt"]),
        Some(PollState::Scheduled)
    );

    // Write-then-read of one register observes the write.
    tree.write(&["Core", "AxiVersion", "ScratchPad"], 0x1234).unwrap();
    assert_eq!(tree.read(&["Core", "AxiVersion", "ScratchPad"]).unwrap(), 0x1234);

    // The operation sequence number moved monotonically throughout.
    assert!(tree.seq() > 0);
}

#[test]
fn poll_loop_survives_a_flaky_link() {
    let (mut tree, transport) = create_tree(false);
    let mut poller = Poller::attach(&tree);
    let mut delay = MockDelay;

    transport.set_fail_all_reads(true);
    poller.run_for(2, Duration::from_secs(1), &mut delay, &mut tree);
    assert_eq!(
        poller.state(&["Core", "TenGigEth", "RxFrameCnt"]),
        Some(PollState::Failed)
    );

    // Link recovers; every entry comes back without intervention.
    transport.set_fail_all_reads(false);
    poller.run_for(1, Duration::from_secs(1), &mut delay, &mut tree);
    assert_eq!(
        poller.state(&["Core", "TenGigEth", "RxFrameCnt"]),
        Some(PollState::Scheduled)
    );
}
