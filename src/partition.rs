//! Splits a port interval into contiguous per-worker sub-ranges.

use crate::error::ScanError;

/// How many ports a single worker takes on. The worker count for an
/// address is derived from this, never supplied by the caller.
pub const PORTS_PER_WORKER: u32 = 100;

/// An inclusive interval of ports with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    /// First port of the interval.
    pub start: u16,
    /// Last port of the interval.
    pub end: u16,
}

impl PortRange {
    /// Validates the interval. Inverted intervals are rejected outright;
    /// unlike address ranges, port ends are not swapped into order.
    pub fn new(start: u16, end: u16) -> Result<Self, ScanError> {
        if end < start {
            return Err(ScanError::InvalidPortRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of ports covered, counting both ends.
    #[must_use]
    pub fn count(&self) -> u32 {
        u32::from(self.end - self.start) + 1
    }

    /// Ascending iterator over every port in the interval.
    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

/// Number of workers one address scan will dispatch: one per
/// [`PORTS_PER_WORKER`]-sized slice of the interval, rounding up.
#[must_use]
pub fn worker_count(range: PortRange) -> u32 {
    range.count().div_ceil(PORTS_PER_WORKER)
}

/// Yields the partition plan for `range`: contiguous, non-overlapping
/// sub-ranges of at most [`PORTS_PER_WORKER`] ports each, in ascending
/// order, whose union is exactly the input interval.
#[must_use]
pub const fn partition(range: PortRange) -> Partitions {
    Partitions {
        range,
        next_start: range.start as u32,
    }
}

/// Iterator produced by [`partition`]. Deterministic: the same range
/// always yields the identical plan.
#[derive(Debug)]
pub struct Partitions {
    range: PortRange,
    // u32 because the cursor steps past u16::MAX after the last slice.
    next_start: u32,
}

impl Iterator for Partitions {
    type Item = PortRange;

    fn next(&mut self) -> Option<PortRange> {
        // Stopping here keeps a non-exact final slice from running past
        // the end of the interval.
        if self.next_start > u32::from(self.range.end) {
            return None;
        }

        let start = self.next_start;
        let end = (start + PORTS_PER_WORKER - 1).min(u32::from(self.range.end));
        self.next_start = start + PORTS_PER_WORKER;

        Some(PortRange {
            start: start.try_into().expect("Could not convert u32 to u16"),
            end: end.try_into().expect("Could not convert u32 to u16"),
        })
    }
}
