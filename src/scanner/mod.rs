//! Core functionality for actual scanning behaviour.
//!
//! One address is swept at a time. Its port interval is partitioned
//! into per-worker sub-ranges, one concurrent worker is dispatched per
//! sub-range, and a barrier holds the per-address completion notice
//! until the whole worker set has finished.

mod probe;
use probe::Probe;

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::task::JoinSet;

use crate::address::AddressRange;
use crate::error::ScanError;
use crate::partition::{partition, worker_count, PortRange};
use crate::report::ReportSink;

/// A worker's exclusive slice of one address scan. Never shared: each
/// worker owns its job for its whole lifetime.
#[derive(Debug, Clone, Copy)]
struct ScanJob {
    addr: Ipv4Addr,
    ports: PortRange,
}

/// Drives a sweep over an address range.
///
/// Addresses are scanned strictly sequentially; only ports within one
/// address are probed concurrently. Workers share nothing mutable with
/// each other, they only stream results into the sink.
pub struct Scanner {
    probe: Arc<Probe>,
    sink: Arc<dyn ReportSink>,
}

impl Scanner {
    /// Builds a scanner for one run.
    ///
    /// `timeout` bounds every connect attempt; `only_show_open` drops
    /// closed-port results at the point they are probed.
    #[must_use]
    pub fn new(timeout: Duration, only_show_open: bool, sink: Arc<dyn ReportSink>) -> Self {
        Self {
            probe: Arc::new(Probe::new(timeout, only_show_open)),
            sink,
        }
    }

    /// Sweeps every address in the range against the port interval.
    ///
    /// An address's full worker set finishes before the next address is
    /// dispatched. On [`ScanError::Interrupted`] the remaining addresses
    /// are not scanned; results already reported stand.
    pub async fn run(&self, addresses: &AddressRange, ports: PortRange) -> Result<(), ScanError> {
        for addr in addresses.iter() {
            self.scan_address(addr, ports).await?;
        }
        Ok(())
    }

    /// Probes all ports of one address, blocks until every worker has
    /// finished, then signals completion to the sink.
    async fn scan_address(&self, addr: Ipv4Addr, ports: PortRange) -> Result<(), ScanError> {
        debug!(
            "Dispatching {} workers for {} over ports {}-{}",
            worker_count(ports),
            addr,
            ports.start,
            ports.end
        );

        let mut workers = JoinSet::new();
        for sub_range in partition(ports) {
            let job = ScanJob {
                addr,
                ports: sub_range,
            };
            let probe = Arc::clone(&self.probe);
            let sink = Arc::clone(&self.sink);
            workers.spawn(async move { run_worker(job, probe.as_ref(), sink.as_ref()).await });
        }

        // Rendezvous barrier: the completion notice must never go out
        // before the last worker's last port has been probed.
        while let Some(finished) = workers.join_next().await {
            if let Err(e) = finished {
                debug!("Worker for {} did not finish: {}", addr, &e);
                return Err(ScanError::Interrupted(addr));
            }
        }

        self.sink.scan_complete(addr);
        Ok(())
    }
}

/// Sequentially probes every port of the job's sub-range in ascending
/// order. Suspends only inside the probe's bounded connect.
async fn run_worker(job: ScanJob, probe: &Probe, sink: &dyn ReportSink) {
    for port in job.ports.iter() {
        probe.probe(job.addr, port, sink).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{PortState, ProbeResult};
    use std::sync::Mutex;
    use tokio::net::TcpListener;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Port(Ipv4Addr, u16, PortState),
        Complete(Ipv4Addr),
    }

    /// Records the exact emission order across all workers.
    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ReportSink for RecordingSink {
        fn port_result(&self, result: ProbeResult) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Port(result.addr, result.port, result.state));
        }

        fn scan_complete(&self, addr: Ipv4Addr) {
            self.events.lock().unwrap().push(Event::Complete(addr));
        }
    }

    fn localhost_range() -> AddressRange {
        AddressRange::new("127.0.0.1", "127.0.0.1").unwrap()
    }

    #[tokio::test]
    async fn completion_notice_comes_after_every_result() {
        // 250 ports derive three workers, so the barrier actually has
        // a set to wait on.
        let ports = PortRange::new(1, 250).unwrap();
        let sink = Arc::new(RecordingSink::default());
        let scanner = Scanner::new(Duration::from_millis(200), false, sink.clone());

        scanner.run(&localhost_range(), ports).await.unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 251);
        assert_eq!(events.last(), Some(&Event::Complete(Ipv4Addr::LOCALHOST)));
        let ports_reported = events
            .iter()
            .filter(|e| matches!(e, Event::Port(..)))
            .count();
        assert_eq!(ports_reported, 250);
    }

    #[tokio::test]
    async fn results_within_one_worker_ascend() {
        // A sub-slice interval keeps the whole scan on a single worker,
        // so the global emission order is that worker's probe order.
        let ports = PortRange::new(1, 80).unwrap();
        let sink = Arc::new(RecordingSink::default());
        let scanner = Scanner::new(Duration::from_millis(200), false, sink.clone());

        scanner.run(&localhost_range(), ports).await.unwrap();

        let reported: Vec<u16> = sink
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::Port(_, port, _) => Some(*port),
                Event::Complete(_) => None,
            })
            .collect();
        let expected: Vec<u16> = (1..=80).collect();
        assert_eq!(reported, expected);
    }

    #[tokio::test]
    async fn open_port_is_reported_and_closed_filtered() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open_port = listener.local_addr().unwrap().port();

        let ports = PortRange::new(open_port.saturating_sub(1), open_port).unwrap();
        let sink = Arc::new(RecordingSink::default());
        let scanner = Scanner::new(Duration::from_millis(500), true, sink.clone());

        scanner.run(&localhost_range(), ports).await.unwrap();

        let events = sink.events();
        assert!(events.contains(&Event::Port(
            Ipv4Addr::LOCALHOST,
            open_port,
            PortState::Open
        )));
        assert_eq!(events.last(), Some(&Event::Complete(Ipv4Addr::LOCALHOST)));
        // Closed results were dropped at the point of generation.
        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::Port(_, _, PortState::Closed))));
    }
}
