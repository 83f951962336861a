// Telemetry module for structured logging and metrics

use anyhow::Result;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

/// Initialize structured logging with JSON formatting.
///
/// Log levels come from `RUST_LOG` when set, otherwise from configuration.
pub fn init_logging(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(json_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;

    tracing::info!(log_level = log_level, "Structured logging initialized");

    Ok(())
}

/// Initialize the Prometheus metrics exporter and describe all metrics
pub fn init_metrics(metrics_port: u16) -> Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", metrics_port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid metrics port: {}", e))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus exporter: {}", e))?;

    describe_counter!(
        "schedules_created_total",
        "Total number of schedules created or replaced"
    );
    describe_counter!(
        "scheduling_failed_total",
        "Total number of scheduling requests that failed"
    );
    describe_histogram!(
        "campaign_schedule_batch_size",
        "Number of posts scheduled per campaign request"
    );

    tracing::info!(metrics_port = metrics_port, "Prometheus metrics exporter initialized");

    Ok(())
}

/// Record schedules created or replaced by a scheduling request
#[inline]
pub fn record_schedules_created(count: usize) {
    counter!("schedules_created_total").increment(count as u64);
}

/// Record a failed scheduling request
#[inline]
pub fn record_scheduling_failure(reason: &str) {
    counter!("scheduling_failed_total", "reason" => reason.to_string()).increment(1);
}

/// Record the batch size of a campaign scheduling request
#[inline]
pub fn record_campaign_batch(campaign_id: &Uuid, size: usize) {
    histogram!("campaign_schedule_batch_size", "campaign_id" => campaign_id.to_string())
        .record(size as f64);
}
