//! Metrics for generative backend calls.
//!
//! OpenTelemetry instruments tracking request counts, failures and latency
//! for every backend call, labelled by provider, model and operation.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<GenerationMetrics> = OnceLock::new();

/// Instruments for backend calls.
#[derive(Clone)]
pub struct GenerationMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Successful backend calls
    pub requests: Counter<u64>,
    /// Failed backend calls
    pub errors: Counter<u64>,
    /// Call duration in seconds
    pub duration: Histogram<f64>,
    /// Bytes of image data received
    pub image_bytes: Counter<u64>,
}

impl GenerationMetrics {
    fn init() -> Self {
        let meter = global::meter("storyboard_models");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("storyboard.requests")
                .with_description("Successful generative backend calls")
                .build(),
            errors: meter
                .u64_counter("storyboard.errors")
                .with_description("Failed generative backend calls")
                .build(),
            duration: meter
                .f64_histogram("storyboard.duration")
                .with_unit("seconds")
                .with_description("Generative backend call duration")
                .build(),
            image_bytes: meter
                .u64_counter("storyboard.image_bytes")
                .with_unit("bytes")
                .with_description("Image data received from the backend")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful call.
    pub fn record_request(&self, provider: &str, model: &str, operation: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("operation", operation.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed call.
    pub fn record_error(&self, provider: &str, model: &str, operation: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("operation", operation.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }

    /// Record the size of a received image.
    pub fn record_image(&self, model: &str, bytes: usize) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.image_bytes.add(bytes as u64, labels);
    }
}

impl Default for GenerationMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}
