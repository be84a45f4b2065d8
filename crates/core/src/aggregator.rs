//! Company ticket aggregation.
//!
//! Walks every page of the upstream ticket listing, keeps the tickets whose
//! `custom_fields.cf_empresa` matches the requested company and labels their
//! status. A run either returns every match or fails as a whole.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::FreshdeskConfig;
use crate::freshdesk::{FreshdeskError, TicketSource};
use crate::metrics::{
    AGGREGATIONS_TOTAL, AGGREGATION_DURATION, TICKETS_MATCHED_TOTAL, UPSTREAM_PAGES_TOTAL,
};
use crate::ticket::{StatusTable, Ticket};

/// Errors that abort an aggregation.
#[derive(Debug, Error)]
pub enum AggregatorError {
    /// A page request failed; nothing fetched so far is returned.
    #[error("Failed to fetch tickets page {page} from Freshdesk: {source}")]
    Upstream {
        page: u32,
        #[source]
        source: FreshdeskError,
    },

    /// The upstream kept returning full pages past the configured limit.
    #[error("Upstream returned {max_pages} full pages without reaching the end")]
    PageLimitExceeded { max_pages: u32 },
}

/// Pagination parameters for the aggregation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorSettings {
    /// Page size requested from the upstream. A shorter page ends the walk.
    pub per_page: u32,
    /// Maximum number of pages requested in one run.
    pub max_pages: u32,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            per_page: 100,
            max_pages: 1000,
        }
    }
}

impl From<&FreshdeskConfig> for AggregatorSettings {
    fn from(config: &FreshdeskConfig) -> Self {
        Self {
            per_page: config.per_page,
            max_pages: config.max_pages,
        }
    }
}

/// Paginates, filters and decorates tickets for one company per call.
///
/// Holds no mutable state; a single instance is shared by all requests.
pub struct TicketAggregator {
    source: Arc<dyn TicketSource>,
    statuses: Arc<StatusTable>,
    settings: AggregatorSettings,
}

impl TicketAggregator {
    pub fn new(
        source: Arc<dyn TicketSource>,
        statuses: StatusTable,
        settings: AggregatorSettings,
    ) -> Self {
        Self {
            source,
            statuses: Arc::new(statuses),
            settings,
        }
    }

    pub fn settings(&self) -> AggregatorSettings {
        self.settings
    }

    pub fn statuses(&self) -> &StatusTable {
        &self.statuses
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch every ticket whose company field equals `company`.
    ///
    /// The comparison is exact and case-sensitive. Tickets keep upstream
    /// order. Callers are expected to reject an empty `company`.
    pub async fn fetch_tickets_by_company(
        &self,
        company: &str,
    ) -> Result<Vec<Ticket>, AggregatorError> {
        let start = Instant::now();
        let result = self.walk_pages(company).await;

        let outcome = if result.is_ok() { "ok" } else { "error" };
        AGGREGATIONS_TOTAL.with_label_values(&[outcome]).inc();
        AGGREGATION_DURATION
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());

        match &result {
            Ok(tickets) => {
                TICKETS_MATCHED_TOTAL.inc_by(tickets.len() as u64);
                info!(
                    company = %company,
                    matched = tickets.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Ticket aggregation finished"
                );
            }
            Err(e) => warn!(company = %company, error = %e, "Ticket aggregation failed"),
        }

        result
    }

    async fn walk_pages(&self, company: &str) -> Result<Vec<Ticket>, AggregatorError> {
        let per_page = self.settings.per_page;
        let source = self.source.name();
        let mut matched = Vec::new();
        let mut page = 1;

        loop {
            if page > self.settings.max_pages {
                return Err(AggregatorError::PageLimitExceeded {
                    max_pages: self.settings.max_pages,
                });
            }

            let tickets = match self.source.list_tickets(page, per_page).await {
                Ok(tickets) => {
                    UPSTREAM_PAGES_TOTAL.with_label_values(&[source, "ok"]).inc();
                    tickets
                }
                Err(source_err) => {
                    UPSTREAM_PAGES_TOTAL.with_label_values(&[source, "error"]).inc();
                    return Err(AggregatorError::Upstream {
                        page,
                        source: source_err,
                    });
                }
            };

            let fetched = tickets.len();
            if fetched == 0 {
                debug!(page, "Empty page, pagination finished");
                break;
            }

            let before = matched.len();
            matched.extend(tickets.into_iter().filter(|t| t.belongs_to(company)));
            debug!(
                page,
                fetched,
                kept = matched.len() - before,
                "Processed tickets page"
            );

            if fetched < per_page as usize {
                break;
            }
            page += 1;
        }

        Ok(matched)
    }

    /// Display label for a status code. Never fails.
    pub fn status_label(&self, code: &Value) -> String {
        self.statuses.label(code)
    }

    /// Add `status_name` to every ticket.
    pub fn decorate(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        self.statuses.decorate(tickets)
    }

    /// Fetch the company's tickets and label their status.
    pub async fn tickets_for_company(
        &self,
        company: &str,
    ) -> Result<Vec<Ticket>, AggregatorError> {
        let tickets = self.fetch_tickets_by_company(company).await?;
        Ok(self.decorate(tickets))
    }
}
