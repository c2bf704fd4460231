use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::constants::web::{DEFAULT_LISTEN_ADDRESS, DEFAULT_TELEMETRY_PATH};
use crate::constants::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prometheus exporter for RSS/Atom service status feeds",
    long_about = "Polls the configured RSS and Atom status feeds of cloud and SaaS \
                  providers, reduces each feed to its current state and exposes it \
                  as Prometheus gauges."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        long = "config.file",
        value_name = "FILE",
        env = "RSS_EXPORTER_CONFIG_FILE",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config_file: PathBuf,

    /// Address to bind the HTTP server to
    #[arg(
        long = "web.listen-address",
        env = "RSS_EXPORTER_LISTEN_ADDRESS",
        default_value = DEFAULT_LISTEN_ADDRESS
    )]
    pub listen_address: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(
        long = "web.listen-port",
        env = "RSS_EXPORTER_LISTEN_PORT",
        required_unless_present = "describe"
    )]
    pub listen_port: Option<u16>,

    /// Path under which metrics are exposed
    #[arg(
        long = "web.telemetry-path",
        env = "RSS_EXPORTER_TELEMETRY_PATH",
        default_value = DEFAULT_TELEMETRY_PATH
    )]
    pub telemetry_path: String,

    /// Minimum log level; RUST_LOG takes precedence when set
    #[arg(long = "log.level", env = "RSS_EXPORTER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(
        long = "log.format",
        env = "RSS_EXPORTER_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,

    /// Print a table of the exported metrics and exit
    #[arg(long)]
    pub describe: bool,

    /// Table format used by --describe
    #[arg(long = "describe.format", value_enum, default_value_t = DescribeFormat::Markdown)]
    pub describe_format: DescribeFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescribeFormat {
    Markdown,
    Jira,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// Address of the HTTP server, when a port was given
    pub fn listen_addr(&self) -> Option<SocketAddr> {
        self.listen_port
            .map(|port| SocketAddr::new(self.listen_address, port))
    }
}
