use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(handle)
}

/// Pre-register so they appear before the first request. Histograms only
/// appear once a real sample is recorded.
fn register_metrics() {
    counter!("screenings_total", "result" => "Hit").absolute(0);
    counter!("screenings_total", "result" => "Clear").absolute(0);
    counter!("screenings_failed_total", "kind" => "upstream").absolute(0);
    counter!("screenings_failed_total", "kind" => "internal").absolute(0);
    counter!("rate_limited_total").absolute(0);

    gauge!("rate_limit_tracked_clients").set(0.0);
}

/// A handle backed by a recorder that is never installed globally.
/// Lets tests build several routers in one process.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_adds_no_latency_samples() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, register_metrics);

        let rendered = handle.render();
        assert!(rendered.contains("screenings_total"));
        assert!(rendered.contains("rate_limit_tracked_clients"));
        assert!(!rendered.contains("upstream_latency_seconds"));
    }
}
