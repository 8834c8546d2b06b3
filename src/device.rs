//! Device tree and address resolution
//!
//! A [`Device`] is a named, addressable grouping of registers and sub-devices
//! mirroring one firmware block's register map. Devices compose into a plain
//! owned tree; there is no inheritance, only the capability split between a
//! leaf with value access ([`Register`](crate::Register)) and a container
//! with children.
//!
//! [`RegisterTree`] owns the assembled tree plus the transport and is the
//! only way to move register values: it resolves paths to absolute addresses
//! (purely additive, no alignment inference), enforces the construction-time
//! invariants once, and stamps the per-register value cache.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;

use device_driver::RegisterInterface;

use crate::register::{Cached, Register};
use crate::{ConfigError, Error};

/// A child of a [`Device`]: either a leaf register or a nested device
#[derive(Debug, Clone)]
pub enum Node {
    /// Leaf register
    Register(Register),
    /// Nested device
    Device(Device),
}

impl Node {
    /// Name of the child, whichever kind it is
    pub fn name(&self) -> &str {
        match self {
            Node::Register(r) => r.name(),
            Node::Device(d) => d.name(),
        }
    }
}

/// A named, addressable collection of registers and sub-devices
///
/// `base_offset` is relative to the parent device. A disabled device stays
/// structurally present (its metadata remains inspectable) but is excluded
/// from transport traffic, from polling and from overlap checking — the
/// simulation configurations of the example design disable every block that
/// needs real hardware behind it.
#[derive(Debug, Clone)]
pub struct Device {
    name: String,
    base_offset: u64,
    enabled: bool,
    span: Option<u64>,
    children: Vec<Node>,
}

impl Device {
    /// Create an empty, enabled device at the given byte offset
    pub fn new(name: &str, base_offset: u64) -> Self {
        Self {
            name: name.to_string(),
            base_offset,
            enabled: true,
            span: None,
            children: Vec::new(),
        }
    }

    /// Set the enabled flag (builder style)
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Declare the device's address span in bytes
    ///
    /// When declared, every child must fit inside `[0, span)` relative to the
    /// device, checked at tree construction.
    pub fn with_span(mut self, span: u64) -> Self {
        self.span = Some(span);
        self
    }

    /// Device name (unique within its parent)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte offset relative to the parent device
    pub fn base_offset(&self) -> u64 {
        self.base_offset
    }

    /// Whether the device participates in transport traffic
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Declared address span, if any
    pub fn span(&self) -> Option<u64> {
        self.span
    }

    /// Children in insertion order
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Add a leaf register
    ///
    /// # Errors
    ///
    /// [`ConfigError::NameCollision`] if a sibling of the same name exists.
    pub fn add_register(&mut self, register: Register) -> Result<(), ConfigError> {
        self.check_name(register.name())?;
        self.children.push(Node::Register(register));
        Ok(())
    }

    /// Add a nested device
    ///
    /// # Errors
    ///
    /// [`ConfigError::NameCollision`] if a sibling of the same name exists.
    pub fn add_device(&mut self, device: Device) -> Result<(), ConfigError> {
        self.check_name(device.name())?;
        self.children.push(Node::Device(device));
        Ok(())
    }

    /// Add an indexed family of identical devices
    ///
    /// `build(index)` produces one instance (carrying its own index-derived
    /// name); its base offset is overridden to `base + index * stride`. The
    /// builder-declared footprint of every instance must fit the stride, so a
    /// descriptor bug surfaces here rather than as a runtime address clash.
    ///
    /// # Errors
    ///
    /// [`ConfigError::StrideTooSmall`] if an instance's footprint exceeds
    /// `stride`, plus anything the builder or [`add_device`](Self::add_device)
    /// reports.
    pub fn add_device_array<F>(
        &mut self,
        base: u64,
        stride: u64,
        count: usize,
        build: F,
    ) -> Result<(), ConfigError>
    where
        F: Fn(usize) -> Result<Device, ConfigError>,
    {
        for index in 0..count {
            let mut instance = build(index)?;
            instance.base_offset = base + index as u64 * stride;
            let footprint = instance.footprint();
            if footprint > stride {
                return Err(ConfigError::StrideTooSmall {
                    device: instance.name,
                    stride,
                    footprint,
                });
            }
            self.add_device(instance)?;
        }
        Ok(())
    }

    /// Footprint of the device in bytes, relative to its own base
    ///
    /// The declared span wins if one was given; otherwise the footprint is
    /// computed from the furthest child end.
    pub fn footprint(&self) -> u64 {
        if let Some(span) = self.span {
            return span;
        }
        self.children
            .iter()
            .map(|node| match node {
                Node::Register(r) => r.byte_range().1,
                Node::Device(d) => d.base_offset + d.footprint(),
            })
            .max()
            .unwrap_or(0)
    }

    /// Look up a direct child by name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|node| node.name() == name)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|node| node.name() == name)
    }

    fn check_name(&self, name: &str) -> Result<(), ConfigError> {
        if self.child(name).is_some() {
            return Err(ConfigError::NameCollision {
                device: self.name.clone(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Construction-time validation of this device and its enabled subtree
    ///
    /// Disabled subtrees are skipped entirely: they carry no transport
    /// traffic, so sim configurations stay cheap to build.
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        for node in &self.children {
            match node {
                Node::Register(r) => {
                    if r.bit_size() == 0 || r.bit_size() > 64 || r.bit_offset() + r.bit_size() > 64
                    {
                        return Err(ConfigError::BitWidth {
                            register: r.name().to_string(),
                        });
                    }
                    if r.poll_interval().is_some_and(|interval| interval.is_zero()) {
                        return Err(ConfigError::PollInterval {
                            register: r.name().to_string(),
                        });
                    }
                    if let Some(span) = self.span {
                        if r.byte_range().1 > span {
                            return Err(ConfigError::SpanExceeded {
                                device: self.name.clone(),
                                child: r.name().to_string(),
                            });
                        }
                    }
                }
                Node::Device(d) => {
                    if let Some(span) = self.span {
                        if d.base_offset + d.footprint() > span {
                            return Err(ConfigError::SpanExceeded {
                                device: self.name.clone(),
                                child: d.name.clone(),
                            });
                        }
                    }
                    d.validate()?;
                }
            }
        }

        // Pairwise byte-range overlap among sibling leaf registers
        let registers: Vec<&Register> = self
            .children
            .iter()
            .filter_map(|node| match node {
                Node::Register(r) => Some(r),
                Node::Device(_) => None,
            })
            .collect();
        for (i, a) in registers.iter().enumerate() {
            for b in &registers[i + 1..] {
                let (a_start, a_end) = a.byte_range();
                let (b_start, b_end) = b.byte_range();
                if a_start < b_end && b_start < a_end {
                    return Err(ConfigError::Overlap {
                        device: self.name.clone(),
                        first: a.name().to_string(),
                        second: b.name().to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    fn collect_pollable(&self, prefix: &mut Vec<String>, out: &mut Vec<(Vec<String>, Duration)>) {
        if !self.enabled {
            return;
        }
        for node in &self.children {
            match node {
                Node::Register(r) => {
                    if let Some(interval) = r.poll_interval() {
                        prefix.push(r.name().to_string());
                        out.push((prefix.clone(), interval));
                        prefix.pop();
                    }
                }
                Node::Device(d) => {
                    prefix.push(d.name.clone());
                    d.collect_pollable(prefix, out);
                    prefix.pop();
                }
            }
        }
    }
}

/// Walk `path` below `root`, summing offsets
///
/// Intermediate segments must name devices and the final segment a register.
/// In strict mode a disabled device anywhere along the path aborts the walk.
fn locate_mut<'a>(
    root: &'a mut Device,
    path: &[&str],
    strict: bool,
) -> Option<(u64, &'a mut Register)> {
    if strict && !root.enabled {
        return None;
    }
    let (last, intermediate) = path.split_last()?;
    let mut device = root;
    let mut base = device.base_offset;
    for segment in intermediate {
        match device.child_mut(segment)? {
            Node::Device(d) => {
                if strict && !d.enabled {
                    return None;
                }
                base += d.base_offset;
                device = d;
            }
            Node::Register(_) => return None,
        }
    }
    match device.child_mut(last)? {
        Node::Register(r) => Some((base + r.offset(), r)),
        Node::Device(_) => None,
    }
}

fn locate<'a>(root: &'a Device, path: &[&str], strict: bool) -> Option<(u64, &'a Register)> {
    if strict && !root.enabled {
        return None;
    }
    let (last, intermediate) = path.split_last()?;
    let mut device = root;
    let mut base = device.base_offset;
    for segment in intermediate {
        match device.child(segment)? {
            Node::Device(d) => {
                if strict && !d.enabled {
                    return None;
                }
                base += d.base_offset;
                device = d;
            }
            Node::Register(_) => return None,
        }
    }
    match device.child(last)? {
        Node::Register(r) => Some((base + r.offset(), r)),
        Node::Device(_) => None,
    }
}

/// The assembled register tree plus its transport
///
/// Construction validates the whole enabled subtree once (overlaps, spans,
/// bit geometry); the structure is immutable afterwards. All value traffic
/// funnels through [`read`](Self::read) / [`write`](Self::write) and their
/// typed variants, which resolve strictly: a path through a disabled device
/// yields [`Error::NotFound`] rather than touching the bus.
///
/// Paths are sequences of child names below the (unnamed-in-path) root, e.g.
/// `["Core", "FwRudpServer[0]", "ValidCnt"]`.
#[derive(Debug)]
pub struct RegisterTree<T> {
    root: Device,
    transport: T,
    seq: u64,
}

impl<T> RegisterTree<T>
where
    T: RegisterInterface<AddressType = u64>,
{
    /// Validate the descriptor tree and attach the transport
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] aborts construction; a partially validated tree is
    /// never returned.
    pub fn new(root: Device, transport: T) -> Result<Self, ConfigError> {
        root.validate()?;
        log::debug!("register tree '{}' validated", root.name());
        Ok(Self {
            root,
            transport,
            seq: 0,
        })
    }

    /// The root device
    pub fn root(&self) -> &Device {
        &self.root
    }

    /// Current operation sequence number (monotonic, bumped per successful
    /// read or write)
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Direct access to the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the tree and return the transport
    pub fn release(self) -> T {
        self.transport
    }

    /// Absolute address of the register at `path` (non-strict: disabled
    /// devices are still resolvable for inspection)
    pub fn address_of(&self, path: &[&str]) -> Result<u64, Error<T::Error>> {
        locate(&self.root, path, false)
            .map(|(address, _)| address)
            .ok_or(Error::NotFound)
    }

    /// Descriptor of the register at `path` (non-strict)
    pub fn register(&self, path: &[&str]) -> Result<&Register, Error<T::Error>> {
        locate(&self.root, path, false)
            .map(|(_, register)| register)
            .ok_or(Error::NotFound)
    }

    /// Last-known value of the register at `path`, if it was ever accessed
    pub fn cached(&self, path: &[&str]) -> Result<Option<Cached>, Error<T::Error>> {
        self.register(path).map(|register| register.cached())
    }

    /// Read the register at `path` through the transport
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for a bad path or a disabled device along it,
    /// [`Error::Access`] for a `WriteOnly` register, [`Error::Transport`] on
    /// bus failure.
    pub fn read(&mut self, path: &[&str]) -> Result<u64, Error<T::Error>> {
        let seq = self.seq + 1;
        let (address, register) = locate_mut(&mut self.root, path, true).ok_or(Error::NotFound)?;
        let value = register.read_from(address, &mut self.transport, seq)?;
        self.seq = seq;
        Ok(value)
    }

    /// Write the register at `path` through the transport
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for a bad path or a disabled device along it,
    /// [`Error::Access`] for a `ReadOnly` register, [`Error::Range`] when the
    /// value exceeds the declared bit width, [`Error::Transport`] on bus
    /// failure.
    pub fn write(&mut self, path: &[&str], value: u64) -> Result<(), Error<T::Error>> {
        let seq = self.seq + 1;
        let (address, register) = locate_mut(&mut self.root, path, true).ok_or(Error::NotFound)?;
        register.write_to(address, &mut self.transport, value, seq)?;
        self.seq = seq;
        Ok(())
    }

    /// Read a `Bool`-typed register, coercing 0/non-zero to false/true
    ///
    /// # Errors
    ///
    /// [`Error::Type`] when the register is not `Bool`-typed, plus everything
    /// [`read`](Self::read) can report.
    pub fn read_bool(&mut self, path: &[&str]) -> Result<bool, Error<T::Error>> {
        let seq = self.seq + 1;
        let (address, register) = locate_mut(&mut self.root, path, true).ok_or(Error::NotFound)?;
        let value = register.read_bool_from(address, &mut self.transport, seq)?;
        self.seq = seq;
        Ok(value)
    }

    /// Write a `Bool`-typed register
    ///
    /// # Errors
    ///
    /// [`Error::Type`] when the register is not `Bool`-typed, plus everything
    /// [`write`](Self::write) can report.
    pub fn write_bool(&mut self, path: &[&str], value: bool) -> Result<(), Error<T::Error>> {
        let seq = self.seq + 1;
        let (address, register) = locate_mut(&mut self.root, path, true).ok_or(Error::NotFound)?;
        register.write_bool_to(address, &mut self.transport, value, seq)?;
        self.seq = seq;
        Ok(())
    }

    /// Paths and intervals of every pollable register under enabled devices
    ///
    /// This is what [`Poller::attach`](crate::Poller::attach) schedules;
    /// registers beneath disabled devices never appear here.
    pub fn pollable(&self) -> Vec<(Vec<String>, Duration)> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.root.collect_pollable(&mut prefix, &mut out);
        out
    }
}
