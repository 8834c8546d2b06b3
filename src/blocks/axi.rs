//! AXI infrastructure blocks: version/identity and stream monitors

use alloc::format;
use core::time::Duration;

use crate::device::Device;
use crate::register::{Register, ValueType};
use crate::ConfigError;

/// Address stride between per-lane channel blocks of a stream monitor
const CHANNEL_STRIDE: u64 = 0x40;

/// Firmware version/identity block (`AxiVersion`)
///
/// The one block that stays enabled in simulation: it has no analog or
/// serial hardware behind it, and reading `FpgaVersion`/`ScratchPad` is how
/// the host sanity-checks the register path.
pub fn axi_version(base_offset: u64) -> Result<Device, ConfigError> {
    let mut dev = Device::new("AxiVersion", base_offset).with_span(0x0001_0000);

    dev.add_register(Register::read_only(
        "FpgaVersion",
        "FPGA firmware version number",
        0x000,
        32,
    ))?;

    dev.add_register(Register::read_write(
        "ScratchPad",
        "Register to test reads and writes",
        0x004,
        32,
    ))?;

    dev.add_register(
        Register::read_only(
            "UpTimeCnt",
            "Number of seconds since last reset",
            0x008,
            32,
        )
        .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_write(
            "FpgaReload",
            "Reload the FPGA from the attached PROM",
            0x100,
            1,
        )
        .with_value_type(ValueType::Bool),
    )?;

    dev.add_register(Register::read_write(
        "FpgaReloadAddress",
        "PROM address for the FPGA reload",
        0x104,
        32,
    ))?;

    dev.add_register(
        Register::read_write("UserReset", "Optional user reset", 0x10C, 1)
            .with_value_type(ValueType::Bool),
    )?;

    dev.add_register(Register::read_only(
        "DnaValue",
        "Xilinx device DNA value (lower 64 bits)",
        0x300,
        64,
    ))?;

    dev.add_register(Register::read_only(
        "DeviceId",
        "Device identification",
        0x500,
        32,
    ))?;

    Ok(dev)
}

/// One monitored AXI-stream lane (`Ch[index]`)
fn channel(index: usize) -> Result<Device, ConfigError> {
    let mut dev = Device::new(&format!("Ch[{index}]"), 0).with_span(CHANNEL_STRIDE);

    dev.add_register(
        Register::read_only("FrameCnt", "Total frame count", 0x00, 64)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("FrameRate", "Current frame rate (Hz)", 0x08, 32)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("FrameRateMax", "Maximum observed frame rate (Hz)", 0x0C, 32)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("FrameRateMin", "Minimum observed frame rate (Hz)", 0x10, 32)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("Bandwidth", "Current bandwidth (bytes/s)", 0x18, 64)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    Ok(dev)
}

/// AXI-stream monitor with one channel block per lane (`AxisMon`)
pub fn axi_stream_mon(name: &str, lanes: usize) -> Result<Device, ConfigError> {
    let mut dev = Device::new(name, 0).with_span(0x0001_0000);

    dev.add_register(Register::write_only(
        "CntRst",
        "Reset all statistics counters",
        0x00,
        1,
    ))?;

    dev.add_device_array(0x40, CHANNEL_STRIDE, lanes, channel)?;

    Ok(dev)
}
