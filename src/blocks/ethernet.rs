//! 10GbE MAC and UDP engine register maps

use alloc::format;
use core::time::Duration;

use crate::device::Device;
use crate::register::{Register, ValueType};
use crate::ConfigError;

/// Address stride between UDP server slots
const SERVER_STRIDE: u64 = 0x10;

/// 10GbE MAC configuration and status (`TenGigEth`)
pub fn ten_gig_eth(base_offset: u64) -> Result<Device, ConfigError> {
    let mut dev = Device::new("TenGigEth", base_offset).with_span(0x0001_0000);

    dev.add_register(Register::read_write(
        "PauseTime",
        "Pause time for flow control",
        0x01C,
        16,
    ))?;

    dev.add_register(
        Register::read_only("PhyReady", "PHY lane lock status", 0x120, 1)
            .with_value_type(ValueType::Bool)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(Register::read_write(
        "MacAddress",
        "MAC address (48 bits, network order handled by firmware)",
        0x200,
        48,
    ))?;

    dev.add_register(
        Register::read_only("RxFrameCnt", "Received frame count", 0x800, 32)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("TxFrameCnt", "Transmitted frame count", 0x804, 32)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("RxFrameDropCnt", "Dropped receive frame count", 0x808, 32)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    Ok(dev)
}

/// One UDP server slot (`Server[index]`)
fn server(index: usize) -> Result<Device, ConfigError> {
    let mut dev = Device::new(&format!("Server[{index}]"), 0).with_span(SERVER_STRIDE);

    dev.add_register(
        Register::read_only("RemotePort", "Connected client UDP port", 0x0, 16)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("RemoteIp", "Connected client IPv4 address", 0x4, 32)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    Ok(dev)
}

/// UDP engine with `num_srv` server slots (`UdpEngine`)
pub fn udp_engine(base_offset: u64, num_srv: usize) -> Result<Device, ConfigError> {
    let mut dev = Device::new("UdpEngine", base_offset).with_span(0x0001_0000);
    dev.add_device_array(0x0, SERVER_STRIDE, num_srv, server)?;
    Ok(dev)
}
