//! Background polling of registers that declare a poll interval
//!
//! The [`Poller`] is an explicit scheduler object: it snapshots the pollable
//! registers of a tree at attach time and fires reads at interval boundaries
//! when the owner calls [`tick`](Poller::tick) with the current monotonic
//! time. Driving the clock from outside keeps the crate `no_std` and lets the
//! hosting application dispatch ticks from whatever timer it has; the
//! [`run_for`](Poller::run_for) helper covers the simple blocking case with a
//! `DelayNs` provider.
//!
//! Failure policy: a transport error marks the entry `Failed`, is reported
//! through the `log` facade, and the entry retries at its unchanged interval.
//! No backoff, no disabling, and nothing a register read returns can
//! terminate the loop.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::time::Duration;

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

use crate::device::RegisterTree;

/// Scheduling state of one polled register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollState {
    /// Not attached to a running scheduler (or read just completed, before
    /// re-arming — the scheduler re-arms in the same tick, so this state is
    /// not observable between ticks)
    Idle,
    /// Armed, waiting for the next interval boundary
    Scheduled,
    /// A read is outstanding
    InFlight,
    /// The last read failed; retrying at the unchanged interval
    Failed,
}

struct Entry {
    path: Vec<String>,
    interval: Duration,
    due: Duration,
    state: PollState,
}

impl Entry {
    fn matches(&self, path: &[&str]) -> bool {
        self.path.len() == path.len()
            && self.path.iter().zip(path).all(|(a, b)| a == b)
    }
}

/// Tick-driven scheduler for registers with a poll interval
///
/// Created at startup from a validated tree, torn down at shutdown. Polling
/// traffic goes through the same tree (and therefore the same transport
/// serialization) as user-driven reads; per-register reads are dispatched
/// sequentially within a tick, so one register never has two overlapping
/// reads.
pub struct Poller {
    entries: Vec<Entry>,
    clock: Duration,
}

impl Poller {
    /// Snapshot the pollable registers of `tree` and arm them
    ///
    /// Every register with a poll interval beneath enabled devices becomes an
    /// entry (`Idle` → `Scheduled`), first due one interval after time zero.
    /// Registers under disabled devices are never scheduled.
    pub fn attach<T>(tree: &RegisterTree<T>) -> Self
    where
        T: RegisterInterface<AddressType = u64>,
    {
        let entries: Vec<Entry> = tree
            .pollable()
            .into_iter()
            .map(|(path, interval)| Entry {
                path,
                interval,
                due: interval,
                state: PollState::Scheduled,
            })
            .collect();
        log::debug!("poller attached, {} registers scheduled", entries.len());
        Self {
            entries,
            clock: Duration::ZERO,
        }
    }

    /// Number of scheduled registers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scheduling state of the entry for `path`, if one exists
    pub fn state(&self, path: &[&str]) -> Option<PollState> {
        self.entries
            .iter()
            .find(|entry| entry.matches(path))
            .map(|entry| entry.state)
    }

    /// Fire every entry whose interval boundary has passed
    ///
    /// `now` is monotonic time of the caller's choosing (the same epoch must
    /// be used across calls). Entries that fall multiple intervals behind
    /// fire once and re-arm past `now` — the scheduler catches up without
    /// bursting reads.
    pub fn tick<T>(&mut self, now: Duration, tree: &mut RegisterTree<T>)
    where
        T: RegisterInterface<AddressType = u64>,
        T::Error: Debug,
    {
        self.clock = now;
        for entry in &mut self.entries {
            if now < entry.due {
                continue;
            }
            if entry.state == PollState::InFlight {
                // An abandoned read still outstanding: skip this boundary
                // rather than queue a second read of the same register.
                log::debug!("poll of {:?} still in flight, skipping tick", entry.path);
            } else {
                entry.state = PollState::InFlight;
                let path: Vec<&str> = entry.path.iter().map(String::as_str).collect();
                match tree.read(&path) {
                    Ok(_) => {
                        entry.state = PollState::Scheduled;
                    }
                    Err(err) => {
                        entry.state = PollState::Failed;
                        log::warn!("poll of {:?} failed: {:?}", entry.path, err);
                    }
                }
            }
            while entry.due <= now {
                entry.due += entry.interval;
            }
        }
    }

    /// Blocking convenience loop: `ticks` rounds of sleep-then-tick
    ///
    /// Continues from the poller's current clock, advancing it by
    /// `resolution` per round. `resolution` should divide the shortest poll
    /// interval, or boundaries will be observed late.
    pub fn run_for<T, D>(
        &mut self,
        ticks: usize,
        resolution: Duration,
        delay: &mut D,
        tree: &mut RegisterTree<T>,
    ) where
        T: RegisterInterface<AddressType = u64>,
        T::Error: Debug,
        D: DelayNs,
    {
        for _ in 0..ticks {
            delay.delay_ms(resolution.as_millis() as u32);
            let now = self.clock + resolution;
            self.tick(now, tree);
        }
    }
}
