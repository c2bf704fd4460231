use super::factory::MetricsFactory;
use crate::constants::metrics::NAMESPACE;
use prometheus::GaugeVec;

/// Constant `rss_exporter_build_info{version}` gauge, always 1
pub fn build_info() -> prometheus::Result<GaugeVec> {
    let gauge = MetricsFactory::create_gauge_vec(
        &format!("{}_build_info", NAMESPACE),
        "Version of the running exporter",
        &["version"],
    )?;
    gauge
        .with_label_values(&[env!("CARGO_PKG_VERSION")])
        .set(1.0);
    Ok(gauge)
}
