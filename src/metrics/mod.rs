pub mod build_info;
pub mod cycle_metrics;
pub mod description;
pub mod factory;
pub mod publisher;
pub mod server;

pub use build_info::build_info;
pub use cycle_metrics::CycleMetrics;
pub use description::{Description, Descriptions};
pub use publisher::MetricsPublisher;
pub use server::{render, serve};

/// Turns a configured feed name into a valid metric name prefix.
///
/// Characters outside `[a-zA-Z0-9_]` become `_`, and a leading digit gets a
/// `_` prepended, so `aws-test` becomes `aws_test`.
pub fn metric_prefix(name: &str) -> String {
    let mut prefix: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if prefix.starts_with(|c: char| c.is_ascii_digit()) {
        prefix.insert(0, '_');
    }
    prefix
}
