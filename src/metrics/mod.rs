use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Command/query dispatch throughput, by message type and outcome
// - Dispatch latency, by message type
//
// All metrics are registered with Prometheus and exposed via /metrics
// ============================================================================

/// Central metrics registry for the service
pub struct Metrics {
    registry: Registry,

    pub bus_messages_total: IntCounterVec,
    pub bus_dispatch_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let bus_messages_total = IntCounterVec::new(
            Opts::new("bus_messages_total", "Total messages dispatched through a bus"),
            &["bus", "message_type", "outcome"],
        )?;
        registry.register(Box::new(bus_messages_total.clone()))?;

        let bus_dispatch_duration = HistogramVec::new(
            HistogramOpts::new("bus_dispatch_duration_seconds", "Time spent handling a dispatched message")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["bus", "message_type"],
        )?;
        registry.register(Box::new(bus_dispatch_duration.clone()))?;

        Ok(Self {
            registry,
            bus_messages_total,
            bus_dispatch_duration,
        })
    }

    /// Helper to record one dispatch
    pub fn record_dispatch(&self, bus: &str, message_type: &str, outcome: &str, duration_secs: f64) {
        self.bus_messages_total
            .with_label_values(&[bus, message_type, outcome])
            .inc();
        self.bus_dispatch_duration
            .with_label_values(&[bus, message_type])
            .observe(duration_secs);
    }

    /// Render every registered metric in the Prometheus text format
    pub fn render(&self) -> Result<Vec<u8>, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(metrics.render().is_ok());
    }

    #[test]
    fn test_record_dispatch() {
        let metrics = Metrics::new().unwrap();
        metrics.record_dispatch("command", "approve.verification.command", "ok", 0.01);
        metrics.record_dispatch("command", "approve.verification.command", "ok", 0.02);
        metrics.record_dispatch("command", "approve.verification.command", "already_processed", 0.01);

        let gathered = metrics.registry.gather();
        let total = gathered.iter().find(|m| m.name() == "bus_messages_total").unwrap();
        assert_eq!(total.metric.len(), 2); // Two different outcome labels
    }

    #[test]
    fn test_render_text_format() {
        let metrics = Metrics::new().unwrap();
        metrics.record_dispatch("query", "get_by_uuid.verification.query", "not_found", 0.003);

        let body = String::from_utf8(metrics.render().unwrap()).unwrap();
        assert!(body.contains("bus_messages_total"));
        assert!(body.contains("get_by_uuid.verification.query"));
    }
}
