//! UltraScale system monitor (`SysMon`)
//!
//! On-die ADC sampling of temperature and supply rails. The raw 12-bit codes
//! sit in the upper bits of each 16-bit sample word; conversion to degrees
//! and volts is the hosting application's business. Disabled in simulation —
//! there is no ADC to sample.

use core::time::Duration;

use crate::device::Device;
use crate::register::Register;
use crate::ConfigError;

/// System monitor block
pub fn sys_mon(base_offset: u64) -> Result<Device, ConfigError> {
    let mut dev = Device::new("SysMon", base_offset).with_span(0x0001_0000);

    dev.add_register(
        Register::read_only("Temperature", "Die temperature (raw ADC code)", 0x400, 12)
            .with_bit_offset(4)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("VccInt", "Internal supply voltage (raw ADC code)", 0x404, 12)
            .with_bit_offset(4)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("VccAux", "Auxiliary supply voltage (raw ADC code)", 0x408, 12)
            .with_bit_offset(4)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    dev.add_register(
        Register::read_only("VccBram", "Block RAM supply voltage (raw ADC code)", 0x418, 12)
            .with_bit_offset(4)
            .with_poll_interval(Duration::from_secs(1)),
    )?;

    Ok(dev)
}
