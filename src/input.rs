//! Provides a means to read, parse and hold configuration options for sweeps.
use clap::Parser;
use serde_derive::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "portsweep",
    version = env!("CARGO_PKG_VERSION"),
    max_term_width = 120,
    help_template = "{bin} {version}\n{about}\n\nUSAGE:\n    {usage}\n\nOPTIONS:\n{options}",
)]
/// Concurrent TCP reachability sweeps over IPv4 address and port ranges.
/// WARNING Do not use this program against sensitive infrastructure since the
/// specified server may not be able to handle this many socket connections at once.
pub struct Opts {
    /// First address of the range to sweep.
    #[arg(short, long)]
    pub start_address: String,

    /// Last address of the range to sweep. Defaults to the start address,
    /// sweeping a single host. Reversed ends are swapped, not rejected.
    #[arg(short, long)]
    pub end_address: Option<String>,

    /// First port of the interval probed on every address.
    #[arg(long, default_value = "1")]
    pub start_port: u16,

    /// Last port of the interval probed on every address. Must not be
    /// below the start port.
    #[arg(long, default_value = "65535")]
    pub end_port: u16,

    /// Only report open ports. Closed ports are dropped at the point they
    /// are probed, never collected.
    #[arg(short, long)]
    pub only_open: bool,

    /// The timeout in milliseconds before a port is assumed to be closed.
    #[arg(short, long, default_value = "500")]
    pub timeout: u32,

    /// Accessible mode. Turns off features which negatively affect screen readers.
    #[arg(long)]
    pub accessible: bool,

    /// Whether to ignore the configuration file or not.
    #[arg(short, long)]
    pub no_config: bool,

    /// Custom path to config file
    #[arg(short, long, value_parser)]
    pub config_path: Option<PathBuf>,
}

#[cfg(not(tarpaulin_include))]
impl Opts {
    /// Reads the command line arguments into an Opts struct.
    pub fn read() -> Self {
        Self::parse()
    }

    /// Merges values found within the user configuration file into the
    /// command line arguments.
    pub fn merge(&mut self, config: &Config) {
        if !self.no_config {
            self.merge_required(config);
            self.merge_optional(config);
        }
    }

    fn merge_required(&mut self, config: &Config) {
        macro_rules! merge_required {
            ($($field: ident),+) => {
                $(
                    if let Some(e) = &config.$field {
                        self.$field = e.clone();
                    }
                )+
            }
        }

        merge_required!(
            start_address,
            start_port,
            end_port,
            only_open,
            timeout,
            accessible
        );
    }

    fn merge_optional(&mut self, config: &Config) {
        macro_rules! merge_optional {
            ($($field: ident),+) => {
                $(
                    if config.$field.is_some() {
                        self.$field = config.$field.clone();
                    }
                )+
            }
        }

        merge_optional!(end_address);
    }
}

/// Struct used to deserialize the options specified within our config file.
/// These will be further merged with our command line arguments in order to
/// generate the final Opts struct.
#[cfg(not(tarpaulin_include))]
#[derive(Debug, Deserialize)]
pub struct Config {
    start_address: Option<String>,
    end_address: Option<String>,
    start_port: Option<u16>,
    end_port: Option<u16>,
    only_open: Option<bool>,
    timeout: Option<u32>,
    accessible: Option<bool>,
}

#[cfg(not(tarpaulin_include))]
impl Config {
    /// Reads the configuration file with TOML format and parses it into a
    /// Config struct.
    ///
    /// # Format
    ///
    /// start_address = "192.168.0.1"
    /// end_address = "192.168.0.254"
    /// start_port = 1
    /// end_port = 1024
    /// only_open = true
    /// timeout = 500
    ///
    pub fn read(custom_config_path: Option<PathBuf>) -> Self {
        let mut content = String::new();
        let config_path = custom_config_path.unwrap_or_else(default_config_path);
        if config_path.exists() {
            content = fs::read_to_string(config_path).unwrap_or_default();
        }

        let config: Self = match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                println!("Found {e} in configuration file.\nAborting sweep.\n");
                std::process::exit(1);
            }
        };

        config
    }
}

/// Constructs default path to config toml
pub fn default_config_path() -> PathBuf {
    let Some(mut config_path) = dirs::home_dir() else {
        panic!("Could not infer config file path.");
    };
    config_path.push(".portsweep.toml");
    config_path
}
