use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use thiserror::Error;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

pub const METRIC_API_REQUEST_MS: &str = "homeservice_api_request_ms";
pub const METRIC_QUERY_HIT_TOTAL: &str = "homeservice_query_cache_hit_total";
pub const METRIC_QUERY_MISS_TOTAL: &str = "homeservice_query_cache_miss_total";
pub const METRIC_QUERY_DEDUP_TOTAL: &str = "homeservice_query_dedup_total";
pub const METRIC_QUERY_EVICT_TOTAL: &str = "homeservice_query_cache_evict_total";
pub const METRIC_QUERY_INVALIDATION_TOTAL: &str = "homeservice_query_invalidation_total";
pub const METRIC_MUTATION_TOTAL: &str = "homeservice_mutation_total";

static METRIC_DESCRIPTIONS: Once = Once::new();

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),
}

/// Install a global tracing subscriber using the provided logging settings.
///
/// Log lines go to stderr so command output on stdout stays machine-readable.
pub fn init(logging: &LoggingSettings) -> Result<(), TelemetryError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| TelemetryError::Subscriber(err.to_string()))
}

/// Registers metric descriptions once per process.
pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_histogram!(
            METRIC_API_REQUEST_MS,
            Unit::Milliseconds,
            "Admin API request latency in milliseconds."
        );
        describe_counter!(
            METRIC_QUERY_HIT_TOTAL,
            Unit::Count,
            "Total number of reads served from a fresh cached result."
        );
        describe_counter!(
            METRIC_QUERY_MISS_TOTAL,
            Unit::Count,
            "Total number of reads that started a new request."
        );
        describe_counter!(
            METRIC_QUERY_DEDUP_TOTAL,
            Unit::Count,
            "Total number of reads that joined an in-flight request."
        );
        describe_counter!(
            METRIC_QUERY_EVICT_TOTAL,
            Unit::Count,
            "Total number of cached results evicted due to capacity."
        );
        describe_counter!(
            METRIC_QUERY_INVALIDATION_TOTAL,
            Unit::Count,
            "Total number of key prefixes invalidated."
        );
        describe_counter!(
            METRIC_MUTATION_TOTAL,
            Unit::Count,
            "Total number of settled mutations by resource, kind and outcome."
        );
    });
}
