//! RSSI reliability core (`FwRudpServer`)
//!
//! The firmware runs one RSSI core per reliable stream; the protocol engine
//! itself is opaque hardware, reached only through this control and
//! statistics surface.

use core::time::Duration;

use crate::device::Device;
use crate::register::{Register, ValueType};
use crate::ConfigError;

/// One RSSI core instance
///
/// `name` carries the instance index (the design instantiates
/// `FwRudpServer[0..3]`).
pub fn rssi_core(name: &str) -> Result<Device, ConfigError> {
    let mut dev = Device::new(name, 0).with_span(0x0001_0000);

    dev.add_register(
        Register::read_write("OpenConn", "Open connection request", 0x000, 1)
            .with_value_type(ValueType::Bool),
    )?;

    dev.add_register(
        Register::read_write("CloseConn", "Close connection request", 0x004, 1)
            .with_value_type(ValueType::Bool),
    )?;

    dev.add_register(Register::read_write(
        "RetransTimeout",
        "Retransmission timeout (ms)",
        0x020,
        16,
    ))?;

    dev.add_register(Register::read_write(
        "CumAckTimeout",
        "Cumulative acknowledgment timeout (ms)",
        0x024,
        16,
    ))?;

    dev.add_register(
        Register::read_only("ConnActive", "Connection established", 0x040, 1)
            .with_value_type(ValueType::Bool)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("ValidCnt", "Valid segment count", 0x044, 32)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("DropCnt", "Dropped segment count", 0x048, 32)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("RetransmitCnt", "Retransmitted segment count", 0x04C, 32)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("FrameRate", "Delivered frame rate (Hz)", 0x050, 32)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    Ok(dev)
}
