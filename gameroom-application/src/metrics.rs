use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    snapshot_loads: AtomicU64,
    load_failures: AtomicU64,
    report_requests: AtomicU64,
    report_failures: AtomicU64,
    dashboards: AtomicU64,
    dashboard_section_failures: AtomicU64,
}

impl Metrics {
    pub fn record_snapshot(&self, failed_files: usize) {
        self.snapshot_loads.fetch_add(1, Ordering::Relaxed);
        self.load_failures
            .fetch_add(failed_files as u64, Ordering::Relaxed);
    }

    pub fn record_report(&self, ok: bool) {
        self.report_requests.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.report_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_dashboard(&self, failed_sections: usize) {
        self.dashboards.fetch_add(1, Ordering::Relaxed);
        self.dashboard_section_failures
            .fetch_add(failed_sections as u64, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let snapshots = self.snapshot_loads.load(Ordering::Relaxed);
        let load_failures = self.load_failures.load(Ordering::Relaxed);
        let requests = self.report_requests.load(Ordering::Relaxed);
        let failures = self.report_failures.load(Ordering::Relaxed);
        let dashboards = self.dashboards.load(Ordering::Relaxed);
        let section_failures = self.dashboard_section_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE gameroom_snapshot_loads_total counter\n\
gameroom_snapshot_loads_total {}\n\
# TYPE gameroom_load_failures_total counter\n\
gameroom_load_failures_total {}\n\
# TYPE gameroom_report_requests_total counter\n\
gameroom_report_requests_total {}\n\
# TYPE gameroom_report_failures_total counter\n\
gameroom_report_failures_total {}\n\
# TYPE gameroom_dashboards_total counter\n\
gameroom_dashboards_total {}\n\
# TYPE gameroom_dashboard_section_failures_total counter\n\
gameroom_dashboard_section_failures_total {}\n",
            snapshots, load_failures, requests, failures, dashboards, section_failures
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_render_in_prometheus_text_format() {
        let metrics = Metrics::default();
        metrics.record_snapshot(2);
        metrics.record_report(true);
        metrics.record_report(false);
        metrics.record_dashboard(3);
        let text = metrics.render_prometheus();
        assert!(text.contains("gameroom_load_failures_total 2\n"));
        assert!(text.contains("gameroom_report_requests_total 2\n"));
        assert!(text.contains("gameroom_report_failures_total 1\n"));
        assert!(text.contains("gameroom_dashboards_total 1\n"));
        assert!(text.contains("gameroom_dashboard_section_failures_total 3\n"));
    }
}
