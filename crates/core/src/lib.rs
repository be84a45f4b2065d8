pub mod aggregator;
pub mod config;
pub mod freshdesk;
pub mod metrics;
pub mod testing;
pub mod ticket;

pub use aggregator::{AggregatorError, AggregatorSettings, TicketAggregator};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, FreshdeskConfig,
    SanitizedConfig, ServerConfig,
};
pub use freshdesk::{FreshdeskClient, FreshdeskError, TicketSource};
pub use ticket::{StatusLabels, StatusTable, Ticket, COMPANY_FIELD, STATUS_NAME_FIELD};
