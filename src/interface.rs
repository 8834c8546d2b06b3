//! Transport implementations and wrappers
//!
//! The tree talks to hardware through `device_driver::RegisterInterface` with
//! `AddressType = u64`: `read_register(address, size_bits, buf)` reads
//! `buf.len()` bytes at an absolute byte address, `write_register` is the
//! mirror image. How those word operations reach the FPGA — in the reference
//! design, SRP framed over an RSSI/UDP link — is entirely the transport
//! implementation's concern, including timeouts and retransmission.
//!
//! Two implementations live here: [`SimTransport`], a sparse in-memory store
//! for simulation and tests, and [`SharedTransport`], which serializes
//! concurrent users of one physical target behind a lock. Mutual exclusion
//! for a shared channel belongs to the transport, not to the register model.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::convert::Infallible;

use device_driver::RegisterInterface;
use spin::Mutex;

/// Sparse in-memory byte store standing in for real hardware
///
/// Unwritten bytes read as zero. Used as the backing transport for `sim`
/// configurations of the example design and throughout the test suite; it
/// never fails.
#[derive(Debug, Default)]
pub struct SimTransport {
    memory: BTreeMap<u64, u8>,
}

impl SimTransport {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Backdoor write, bypassing the register model
    pub fn poke(&mut self, address: u64, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.memory.insert(address + i as u64, *byte);
        }
    }

    /// Backdoor read, bypassing the register model
    pub fn peek(&self, address: u64, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self
                .memory
                .get(&(address + i as u64))
                .copied()
                .unwrap_or(0);
        }
    }
}

impl RegisterInterface for SimTransport {
    type Error = Infallible;
    type AddressType = u64;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.peek(address, read_data);
        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        self.poke(address, write_data);
        Ok(())
    }
}

/// Cloneable handle serializing access to one underlying transport
///
/// The channel to a given physical target is a single shared resource:
/// concurrent register operations against it must be serialized by the
/// transport, so each word operation takes the lock for exactly its own
/// duration. Clones share the same target.
#[derive(Debug)]
pub struct SharedTransport<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> SharedTransport<T> {
    /// Wrap a transport for shared use
    pub fn new(transport: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(transport)),
        }
    }

    /// Run a closure against the locked transport
    ///
    /// For multi-word sequences that must not interleave with other users
    /// (the caller-side serialization the ordering model otherwise leaves
    /// open).
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<T> Clone for SharedTransport<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> RegisterInterface for SharedTransport<T>
where
    T: RegisterInterface<AddressType = u64>,
{
    type Error = T::Error;
    type AddressType = u64;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.inner.lock().read_register(address, size_bits, read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        self.inner.lock().write_register(address, size_bits, write_data)
    }
}
