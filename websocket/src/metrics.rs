//! Prometheus metrics for the session hub.
//!
//! The [`HubMetrics`] struct owns a dedicated [`Registry`] that the optional
//! `/metrics` route encodes into the Prometheus text exposition format.

use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, Encoder, IntCounter,
    IntGauge, Opts, Registry, TextEncoder,
};

/// Central collection of hub-level Prometheus metrics.
pub struct HubMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    /// Current number of connected observer sessions.
    pub sessions_connected: IntGauge,
    /// Total voter registrations accepted.
    pub registrations_total: IntCounter,
    /// Total votes accepted.
    pub votes_total: IntCounter,
    /// Total requests rejected with a user-facing error.
    pub rejections_total: IntCounter,
    /// Total tally broadcasts published.
    pub broadcasts_total: IntCounter,
}

impl HubMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let sessions_connected = register_int_gauge_with_registry!(
            Opts::new(
                "hustings_sessions_connected",
                "Currently connected observer sessions"
            ),
            registry
        )
        .expect("failed to register sessions_connected gauge");

        let registrations_total = register_int_counter_with_registry!(
            Opts::new(
                "hustings_registrations_total",
                "Total voter registrations accepted"
            ),
            registry
        )
        .expect("failed to register registrations_total counter");

        let votes_total = register_int_counter_with_registry!(
            Opts::new("hustings_votes_total", "Total votes accepted"),
            registry
        )
        .expect("failed to register votes_total counter");

        let rejections_total = register_int_counter_with_registry!(
            Opts::new(
                "hustings_rejections_total",
                "Total requests rejected with a user-facing error"
            ),
            registry
        )
        .expect("failed to register rejections_total counter");

        let broadcasts_total = register_int_counter_with_registry!(
            Opts::new(
                "hustings_broadcasts_total",
                "Total tally broadcasts published"
            ),
            registry
        )
        .expect("failed to register broadcasts_total counter");

        Self {
            registry,
            sessions_connected,
            registrations_total,
            votes_total,
            rejections_total,
            broadcasts_total,
        }
    }

    /// Encode every metric in the Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            tracing::warn!(error = %e, "failed to encode metrics");
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl Default for HubMetrics {
    fn default() -> Self {
        Self::new()
    }
}
