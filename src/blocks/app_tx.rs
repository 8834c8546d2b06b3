//! Transmit traffic generator (`AppTx`)
//!
//! The application side of the design carries three identical burst
//! generators, one per RSSI stream. Each exposes a frame-size setting, a
//! write-only send strobe, two polled progress counters and a continuous-mode
//! flag.

use alloc::format;
use core::time::Duration;

use crate::device::Device;
use crate::register::{Register, ValueType};
use crate::ConfigError;

/// Address stride between `AppTx` instances
pub const APP_TX_STRIDE: u64 = 0x0001_0000;

/// One transmit traffic generator (`AppTx{index}`)
pub fn app_tx(index: usize) -> Result<Device, ConfigError> {
    let mut dev = Device::new(&format!("AppTx{index}"), 0).with_span(APP_TX_STRIDE);

    dev.add_register(Register::read_write(
        "FrameSize",
        "Number of words to send per frame (Units of 64-bit words, zero inclusive)",
        0x000,
        32,
    ))?;

    dev.add_register(Register::write_only(
        "SendFrame",
        "Write Only for sending burst of frames (Units of frames)",
        0x004,
        32,
    ))?;

    dev.add_register(
        Register::read_only(
            "FrameCnt",
            "Read Only for monitoring bursting status",
            0x008,
            32,
        )
        .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only(
            "WordCnt",
            "Read Only for monitoring bursting status",
            0x00C,
            32,
        )
        .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_write("ContinuousMode", "Bursting Continuously Flag", 0x010, 1)
            .with_value_type(ValueType::Bool),
    )?;

    Ok(dev)
}

/// The application container: `AppTx0..AppTx2` at [`APP_TX_STRIDE`]
pub fn app(base_offset: u64) -> Result<Device, ConfigError> {
    let mut dev = Device::new("App", base_offset);
    dev.add_device_array(0x0000_0000, APP_TX_STRIDE, 3, app_tx)?;
    Ok(dev)
}
