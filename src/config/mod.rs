pub mod models;
pub mod parser;
#[cfg(test)]
mod tests;

pub use models::{ExporterConfig, FetchConfig, ServiceFeed, StatusMarkersConfig};
pub use parser::*;
