#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

extern crate alloc;

pub mod blocks;
pub mod device;
pub mod interface;
pub mod poller;
pub mod register;

// Re-export main types
pub use device::{Device, Node, RegisterTree};
pub use interface::{SharedTransport, SimTransport};
pub use poller::{PollState, Poller};
pub use register::{AccessMode, Cached, Register, ValueType};

use alloc::string::String;

/// Runtime access errors
///
/// Generic over the transport's error type, so callers keep the full
/// communication failure when one occurs. Everything here is recoverable and
/// surfaced to the immediate caller; nothing in this taxonomy terminates the
/// poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error in the underlying transport
    Transport(E),
    /// Access-mode violation (contains the register's declared mode)
    ///
    /// Returned when reading a `WriteOnly` register or writing a `ReadOnly`
    /// one.
    Access(AccessMode),
    /// Value does not fit the register's declared bit width
    Range {
        /// The rejected value
        value: u64,
        /// Largest value representable in the register's bit width
        max: u64,
    },
    /// Typed access against a register of a different value type
    ///
    /// Contains the register's actual value type (e.g. `write_bool` against a
    /// plain unsigned counter).
    Type(ValueType),
    /// No register at the given path
    ///
    /// Also returned by strict resolution when an intermediate device along
    /// the path is disabled: disabled devices are excluded from transport
    /// traffic.
    NotFound,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Transport(error)
    }
}

/// Descriptor-time configuration errors
///
/// All of these are construction-time failures: a tree that produces one is
/// never handed back to the caller, so a successfully built [`RegisterTree`]
/// is known overlap-free and in-bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Two siblings under the same device share a name
    NameCollision {
        /// The parent device
        device: String,
        /// The colliding child name
        name: String,
    },
    /// Two sibling registers under an enabled device have intersecting byte
    /// ranges
    Overlap {
        /// The parent device
        device: String,
        /// First register of the intersecting pair
        first: String,
        /// Second register of the intersecting pair
        second: String,
    },
    /// A child's address range falls outside its parent's declared span
    SpanExceeded {
        /// The parent device
        device: String,
        /// The out-of-bounds child
        child: String,
    },
    /// A register's bit geometry is invalid (`bit_size` outside 1..=64, or
    /// `bit_offset + bit_size` past 64 bits)
    BitWidth {
        /// The offending register
        register: String,
    },
    /// A register declares a zero poll interval
    PollInterval {
        /// The offending register
        register: String,
    },
    /// A replicated device's footprint exceeds the array stride
    StrideTooSmall {
        /// The offending instance
        device: String,
        /// The requested stride
        stride: u64,
        /// The instance's actual footprint in bytes
        footprint: u64,
    },
}
