//! Register descriptors and value access
//!
//! A [`Register`] is the leaf of the descriptor tree: a named, sized,
//! addressed, access-moded storage location. The descriptor itself is static
//! metadata fixed at tree construction; only the register's *value* (reached
//! through the transport) and its last-known-value cache mutate at runtime.
//!
//! Offsets are byte offsets relative to the parent device. A register may
//! describe a sub-word field (`bit_offset` / `bit_size`), in which case reads
//! shift and mask, and writes read-modify-write when the access mode permits
//! reading back.

use alloc::string::{String, ToString};
use core::time::Duration;

use device_driver::RegisterInterface;

use crate::Error;

/// Access mode of a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccessMode {
    /// Register can only be read (e.g. a status counter)
    ReadOnly,
    /// Register can only be written (e.g. a command strobe)
    WriteOnly,
    /// Register can be read and written
    ReadWrite,
}

impl AccessMode {
    /// Whether this mode permits reads
    pub const fn is_readable(self) -> bool {
        matches!(self, Self::ReadOnly | Self::ReadWrite)
    }

    /// Whether this mode permits writes
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::WriteOnly | Self::ReadWrite)
    }
}

/// Interpretation of a register's raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueType {
    /// Plain unsigned integer (the default)
    UnsignedInt,
    /// Boolean flag: reads coerce 0/non-zero to false/true
    Bool,
    /// Enumerated value; the mapping lives in the hosting application
    Enum,
    /// Application-defined encoding
    Custom,
}

/// Last-known value of a register, updated on every successful read or write
///
/// The stamp is the owning tree's monotonic operation sequence number, not a
/// wall-clock time; it orders cache entries against each other and against
/// [`RegisterTree::seq`](crate::RegisterTree::seq) for staleness checks. The
/// cache is for display and staleness inspection only and is never consulted
/// in place of a fresh read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cached {
    /// The field value (already shifted and masked)
    pub value: u64,
    /// Operation sequence number at which the value was observed
    pub at: u64,
}

/// Descriptor of a single memory-mapped register
#[derive(Debug, Clone)]
pub struct Register {
    name: String,
    description: String,
    offset: u64,
    bit_size: u32,
    bit_offset: u32,
    mode: AccessMode,
    poll_interval: Option<Duration>,
    value_type: ValueType,
    cache: Option<Cached>,
}

impl Register {
    /// Create a register descriptor
    ///
    /// `offset` is the byte offset relative to the parent device; `bit_size`
    /// is the field width in bits (1..=64). Geometry is validated when the
    /// descriptor is assembled into a [`RegisterTree`](crate::RegisterTree),
    /// not here.
    pub fn new(
        name: &str,
        description: &str,
        offset: u64,
        bit_size: u32,
        mode: AccessMode,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            offset,
            bit_size,
            bit_offset: 0,
            mode,
            poll_interval: None,
            value_type: ValueType::UnsignedInt,
            cache: None,
        }
    }

    /// Shorthand for a `ReadOnly` register
    pub fn read_only(name: &str, description: &str, offset: u64, bit_size: u32) -> Self {
        Self::new(name, description, offset, bit_size, AccessMode::ReadOnly)
    }

    /// Shorthand for a `WriteOnly` register
    pub fn write_only(name: &str, description: &str, offset: u64, bit_size: u32) -> Self {
        Self::new(name, description, offset, bit_size, AccessMode::WriteOnly)
    }

    /// Shorthand for a `ReadWrite` register
    pub fn read_write(name: &str, description: &str, offset: u64, bit_size: u32) -> Self {
        Self::new(name, description, offset, bit_size, AccessMode::ReadWrite)
    }

    /// Place the field at a bit offset within its word
    pub fn with_bit_offset(mut self, bit_offset: u32) -> Self {
        self.bit_offset = bit_offset;
        self
    }

    /// Mark the register for background polling at the given interval
    ///
    /// The interval must be non-zero; tree construction rejects zero.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Set the value interpretation (default [`ValueType::UnsignedInt`])
    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Register name (unique within its parent device)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Byte offset relative to the parent device
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Field width in bits
    pub fn bit_size(&self) -> u32 {
        self.bit_size
    }

    /// Bit offset of the field within its word
    pub fn bit_offset(&self) -> u32 {
        self.bit_offset
    }

    /// Access mode
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Poll interval, if the register is marked for background polling
    pub fn poll_interval(&self) -> Option<Duration> {
        self.poll_interval
    }

    /// Value interpretation
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Last successfully read or written value, if any
    pub fn cached(&self) -> Option<Cached> {
        self.cache
    }

    /// Number of bytes this field occupies on the bus
    pub fn byte_size(&self) -> u64 {
        u64::from((self.bit_offset + self.bit_size + 7) / 8)
    }

    /// Byte range `[start, end)` relative to the parent device
    pub fn byte_range(&self) -> (u64, u64) {
        (self.offset, self.offset + self.byte_size())
    }

    /// Largest value representable in the declared bit width
    pub fn max_value(&self) -> u64 {
        if self.bit_size >= 64 {
            u64::MAX
        } else {
            (1u64 << self.bit_size) - 1
        }
    }

    pub(crate) fn read_from<T>(
        &mut self,
        address: u64,
        transport: &mut T,
        seq: u64,
    ) -> Result<u64, Error<T::Error>>
    where
        T: RegisterInterface<AddressType = u64>,
    {
        if !self.mode.is_readable() {
            return Err(Error::Access(self.mode));
        }
        let word = self.read_word(address, transport)?;
        let value = (word >> self.bit_offset) & self.max_value();
        self.cache = Some(Cached { value, at: seq });
        Ok(value)
    }

    pub(crate) fn write_to<T>(
        &mut self,
        address: u64,
        transport: &mut T,
        value: u64,
        seq: u64,
    ) -> Result<(), Error<T::Error>>
    where
        T: RegisterInterface<AddressType = u64>,
    {
        if !self.mode.is_writable() {
            return Err(Error::Access(self.mode));
        }
        let max = self.max_value();
        if value > max {
            return Err(Error::Range { value, max });
        }

        // Sub-word fields merge into the surrounding bytes when the mode
        // allows reading them back; write-only fields have nothing to merge
        // with and are written shifted as-is.
        let sub_word = self.bit_offset != 0 || self.bit_size % 8 != 0;
        let word = if sub_word && self.mode.is_readable() {
            let current = self.read_word(address, transport)?;
            (current & !(max << self.bit_offset)) | (value << self.bit_offset)
        } else {
            value << self.bit_offset
        };

        let size = self.byte_size() as usize;
        let bytes = word.to_le_bytes();
        transport
            .write_register(address, (size * 8) as u32, &bytes[..size])
            .map_err(Error::Transport)?;
        self.cache = Some(Cached { value, at: seq });
        Ok(())
    }

    pub(crate) fn read_bool_from<T>(
        &mut self,
        address: u64,
        transport: &mut T,
        seq: u64,
    ) -> Result<bool, Error<T::Error>>
    where
        T: RegisterInterface<AddressType = u64>,
    {
        if self.value_type != ValueType::Bool {
            return Err(Error::Type(self.value_type));
        }
        Ok(self.read_from(address, transport, seq)? != 0)
    }

    pub(crate) fn write_bool_to<T>(
        &mut self,
        address: u64,
        transport: &mut T,
        value: bool,
        seq: u64,
    ) -> Result<(), Error<T::Error>>
    where
        T: RegisterInterface<AddressType = u64>,
    {
        if self.value_type != ValueType::Bool {
            return Err(Error::Type(self.value_type));
        }
        self.write_to(address, transport, u64::from(value), seq)
    }

    /// Read the raw word spanning this field, little-endian, unshifted
    fn read_word<T>(&self, address: u64, transport: &mut T) -> Result<u64, Error<T::Error>>
    where
        T: RegisterInterface<AddressType = u64>,
    {
        let size = self.byte_size() as usize;
        let mut buf = [0u8; 8];
        transport
            .read_register(address, (size * 8) as u32, &mut buf[..size])
            .map_err(Error::Transport)?;
        Ok(u64::from_le_bytes(buf))
    }
}
