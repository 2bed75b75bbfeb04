//! Binary entry point: reads options, prints the run summary and drives
//! the scanner. Everything interesting lives in the library.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use colored::Colorize;
use log::debug;

use portsweep::address::AddressRange;
use portsweep::input::{Config, Opts};
use portsweep::partition::{worker_count, PortRange};
use portsweep::report::ConsoleSink;
use portsweep::scanner::Scanner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut opts = Opts::read();
    let config = Config::read(opts.config_path.clone());
    opts.merge(&config);
    debug!("Merged options: {:?}", &opts);

    // A missing end address means a single-host sweep.
    let end_address = opts.end_address.as_deref().unwrap_or(&opts.start_address);
    let addresses = AddressRange::new(&opts.start_address, end_address)?;
    let ports = PortRange::new(opts.start_port, opts.end_port)?;

    if !opts.accessible {
        println!("{}", "===== portsweep - TCP reachability prober =====".bold());
    }
    println!(
        "Starting scan on {} address(es), port range: {}-{}",
        addresses.count(),
        ports.start,
        ports.end
    );
    println!(
        "Based on the workload, {} worker(s) will be started per address",
        worker_count(ports)
    );

    let sink = Arc::new(ConsoleSink::new(opts.accessible));
    let scanner = Scanner::new(
        Duration::from_millis(u64::from(opts.timeout)),
        opts.only_open,
        sink,
    );

    scanner
        .run(&addresses, ports)
        .await
        .context("sweep aborted")?;

    Ok(())
}
