//! Errors that abort a sweep before or during dispatch.
use std::net::Ipv4Addr;

use thiserror::Error;

/// The failures a sweep can surface to its caller.
///
/// Individual connect failures are not part of this taxonomy: the probe
/// folds refusals, unreachable networks and timeouts into
/// [`PortState::Closed`](crate::report::PortState) and never reports them
/// as errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The textual address was not a dotted quad of four segments in
    /// `0..=255`. Detected before any probe runs.
    #[error("invalid address format: {0:?}")]
    InvalidAddressFormat(String),

    /// The port interval was inverted. Detected before any probe runs.
    #[error("invalid port range: {start}-{end}")]
    InvalidPortRange {
        /// Requested first port.
        start: u16,
        /// Requested last port.
        end: u16,
    },

    /// The wait for an address's worker set was interrupted. The run
    /// stops here; results already reported are not retracted.
    #[error("scan interrupted while waiting for workers on {0}")]
    Interrupted(Ipv4Addr),
}
