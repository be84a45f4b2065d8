use std::sync::Arc;

use deskproxy_core::{Config, SanitizedConfig, TicketAggregator};

/// Shared application state
///
/// Read-only after startup; handlers share it through `Arc`.
pub struct AppState {
    config: Config,
    aggregator: Arc<TicketAggregator>,
}

impl AppState {
    pub fn new(config: Config, aggregator: Arc<TicketAggregator>) -> Self {
        Self { config, aggregator }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn freshdesk_domain(&self) -> &str {
        &self.config.freshdesk.domain
    }

    pub fn aggregator(&self) -> &TicketAggregator {
        self.aggregator.as_ref()
    }
}
