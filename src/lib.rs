//! Prometheus exporter for RSS and Atom service status feeds
//!
//! Each configured feed is polled on its own schedule, reduced to a single
//! current status (ok, service issue or outage) and exposed as gauges.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod exporter;
pub mod feed;
pub mod metrics;
pub mod scheduler;
pub mod scrapers;
pub mod status;
pub mod store;

pub use error::ExporterError;
pub use exporter::Exporter;
