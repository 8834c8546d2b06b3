//! Top-level composition of the example design
//!
//! `Core` mirrors the firmware's infrastructure side; `root` adds the
//! application side (`App`). Passing `sim = true` disables every block that
//! needs real hardware behind it, leaving only `AxiVersion` (and the
//! application blocks) live — the same split the firmware's simulation
//! configuration uses.

use alloc::format;

use crate::blocks::{app, axi_stream_mon, axi_version, rssi_core, sys_mon, ten_gig_eth, udp_engine};
use crate::device::Device;
use crate::ConfigError;

/// Base offset of the application container
pub const APP_BASE: u64 = 0x8000_0000;

/// Base offset of the first RSSI core
pub const RSSI_BASE: u64 = 0x0012_0000;

/// Address stride between RSSI cores
pub const RSSI_STRIDE: u64 = 0x0001_0000;

/// Base offset of the first AXI-stream monitor
pub const AXIS_MON_BASE: u64 = 0x0015_0000;

/// Address stride between AXI-stream monitors
pub const AXIS_MON_STRIDE: u64 = 0x0001_0000;

/// Infrastructure side of the design (`Core`)
pub fn core(sim: bool) -> Result<Device, ConfigError> {
    let mut dev = Device::new("Core", 0x0000_0000);

    dev.add_device(axi_version(0x0000_0000)?)?;
    dev.add_device(sys_mon(0x0001_0000)?.with_enabled(!sim))?;
    dev.add_device(ten_gig_eth(0x0010_0000)?.with_enabled(!sim))?;
    dev.add_device(udp_engine(0x0011_0000, 2)?.with_enabled(!sim))?;

    dev.add_device_array(RSSI_BASE, RSSI_STRIDE, 3, |i| {
        Ok(rssi_core(&format!("FwRudpServer[{i}]"))?.with_enabled(!sim))
    })?;

    dev.add_device_array(AXIS_MON_BASE, AXIS_MON_STRIDE, 2, |i| {
        Ok(axi_stream_mon(&format!("AxisMon[{i}]"), 2)?.with_enabled(!sim))
    })?;

    Ok(dev)
}

/// The whole design: `Core` plus the `App` traffic generators
pub fn root(sim: bool) -> Result<Device, ConfigError> {
    let mut dev = Device::new("Root", 0);
    dev.add_device(core(sim)?)?;
    dev.add_device(app(APP_BASE)?)?;
    Ok(dev)
}
