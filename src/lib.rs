//! This crate exposes the internal functionality of the `portsweep`
//! TCP reachability prober.
//!
//! Given an inclusive IPv4 address range and an inclusive port range,
//! `portsweep` determines for every (address, port) pair whether a TCP
//! connection can be established within a bounded time, and streams each
//! outcome to a reporting sink as it is produced.
//!
//! ## Architecture Overview
//!
//! The scanning behaviour is managed by
//! [`Scanner`](crate::scanner::Scanner). One run follows this flow:
//!
//! 1. **Address expansion**: the address range is expanded into successive hosts
//! 2. **Partitioning**: each host's port interval is split into contiguous per-worker sub-ranges
//! 3. **Probing**: one concurrent worker per sub-range attempts bounded TCP connects, in ascending port order
//! 4. **Completion**: a barrier holds the per-host completion notice until every worker has finished
//!
//! Hosts are scanned one after another; concurrency exists only between the
//! workers of a single host. Results are streamed, never aggregated, so the
//! memory footprint is flat no matter how large the sweep is.
//!
//! ## Basic Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use portsweep::address::AddressRange;
//! use portsweep::partition::PortRange;
//! use portsweep::report::ConsoleSink;
//! use portsweep::scanner::Scanner;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Sweep a single host; reversed address ranges are swapped, not rejected.
//!     let addresses = AddressRange::new("127.0.0.1", "127.0.0.1")?;
//!
//!     // Probe ports 1-250: enough for several concurrent workers.
//!     let ports = PortRange::new(1, 250)?;
//!
//!     let scanner = Scanner::new(
//!         Duration::from_millis(500),        // Connect timeout per probe
//!         true,                              // Only report open ports
//!         Arc::new(ConsoleSink::new(false)), // Line-oriented console output
//!     );
//!
//!     scanner.run(&addresses, ports).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Malformed addresses and inverted port ranges abort the run before any
//! probe fires. A single failed connect is never an error: refusal,
//! unreachable networks and timeouts all classify the port as `Closed`.
#![allow(clippy::needless_doctest_main)]
#![warn(missing_docs)]

pub mod address;

pub mod error;

pub mod input;

pub mod partition;

pub mod report;

pub mod scanner;
