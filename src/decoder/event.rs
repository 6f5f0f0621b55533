//! Bus-level capture events
//!
//! Input boundary of the analyzer: the capture/timing engine delivers
//! chip-select and byte-level events in non-decreasing time order.
//! Timestamps are opaque pass-through values (nanoseconds by
//! convention); the analyzer never measures time itself.

use std::fmt;

/// What happened on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEventKind {
    /// Chip select became active
    EnableAsserted,
    /// One byte clocked in both directions while selected
    ByteExchanged { mosi: u8, miso: u8 },
    /// Chip select returned to inactive
    EnableDeasserted,
    /// The capture engine flagged a bus-level framing problem
    BusError,
}

/// A time-stamped bus event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusEvent {
    pub kind: BusEventKind,
    /// When the event began
    pub start_time: u64,
    /// When the event ended (equals `start_time` for edges)
    pub end_time: u64,
}

impl BusEvent {
    /// Chip select activation edge.
    pub fn enable_asserted(time: u64) -> Self {
        Self {
            kind: BusEventKind::EnableAsserted,
            start_time: time,
            end_time: time,
        }
    }

    /// One clocked byte pair spanning its clock window.
    pub fn byte_exchanged(mosi: u8, miso: u8, start_time: u64, end_time: u64) -> Self {
        Self {
            kind: BusEventKind::ByteExchanged { mosi, miso },
            start_time,
            end_time,
        }
    }

    /// Chip select deactivation edge.
    pub fn enable_deasserted(time: u64) -> Self {
        Self {
            kind: BusEventKind::EnableDeasserted,
            start_time: time,
            end_time: time,
        }
    }

    /// Bus-level framing problem reported by the capture engine.
    pub fn bus_error(start_time: u64, end_time: u64) -> Self {
        Self {
            kind: BusEventKind::BusError,
            start_time,
            end_time,
        }
    }
}

impl fmt::Display for BusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BusEventKind::EnableAsserted => write!(f, "Enable[t={}]", self.start_time),
            BusEventKind::ByteExchanged { mosi, miso } => write!(
                f,
                "Byte[{:02X}/{:02X}, t={}..{}]",
                mosi, miso, self.start_time, self.end_time
            ),
            BusEventKind::EnableDeasserted => write!(f, "Disable[t={}]", self.start_time),
            BusEventKind::BusError => {
                write!(f, "BusError[t={}..{}]", self.start_time, self.end_time)
            }
        }
    }
}
