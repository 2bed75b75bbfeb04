use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use log::debug;
use tokio::io::{self, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;

use crate::report::{PortState, ProbeResult, ReportSink};

/// Per-run probe settings, shared read-only by every worker.
#[derive(Debug)]
pub struct Probe {
    timeout: Duration,
    only_show_open: bool,
}

impl Probe {
    pub(crate) const fn new(timeout: Duration, only_show_open: bool) -> Self {
        Self {
            timeout,
            only_show_open,
        }
    }

    /// Attempts exactly one connection to `(addr, port)` and classifies
    /// the outcome.
    ///
    /// This is a pure reachability check: on success the stream is shut
    /// down without sending or receiving anything. Refusal, unreachable
    /// networks and timeouts all classify as `Closed`; none of them is
    /// an error and nothing is retried.
    ///
    /// Reporting happens here, at the point of generation: `Open` always
    /// reaches the sink, `Closed` only when `only_show_open` is off.
    pub(crate) async fn probe(&self, addr: Ipv4Addr, port: u16, sink: &dyn ReportSink) -> PortState {
        let socket = SocketAddr::from((addr, port));
        let state = match self.connect(socket).await {
            Ok(tcp_stream) => {
                debug!("Connection was successful, shutting down stream {}", &socket);
                if let Err(e) = { tcp_stream }.shutdown().await {
                    debug!("Shutdown stream error {}", &e);
                }
                PortState::Open
            }
            Err(e) => {
                debug!("Connection to {} failed: {}", &socket, &e);
                PortState::Closed
            }
        };

        if state == PortState::Open || !self.only_show_open {
            sink.port_result(ProbeResult { addr, port, state });
        }
        state
    }

    /// Performs the connection to the socket, bounded by the timeout.
    async fn connect(&self, socket: SocketAddr) -> io::Result<TcpStream> {
        time::timeout(self.timeout, async move { TcpStream::connect(socket).await }).await?
    }
}
