//! Descriptor builders for the firmware blocks of the example design
//!
//! One module per firmware block, each exposing a builder returning the
//! block's [`Device`](crate::Device). The builders only declare layout —
//! names, offsets, bit widths, access modes, poll intervals — exactly as the
//! firmware register maps define them; no behavior lives here.

pub mod app_tx;
pub mod axi;
pub mod core;
pub mod ethernet;
pub mod rssi;
pub mod sysmon;

// Re-export main builders
pub use self::app_tx::{app, app_tx, APP_TX_STRIDE};
pub use self::axi::{axi_stream_mon, axi_version};
pub use self::core::{
    core, root, APP_BASE, AXIS_MON_BASE, AXIS_MON_STRIDE, RSSI_BASE, RSSI_STRIDE,
};
pub use self::ethernet::{ten_gig_eth, udp_engine};
pub use self::rssi::rssi_core;
pub use self::sysmon::sys_mon;
