//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use deskproxy_core::testing::{fixtures, MockTicketSource};
//!
//! let source = Arc::new(MockTicketSource::with_pages(vec![
//!     vec![fixtures::ticket(1, "Acme", 2)],
//! ]));
//! let aggregator = TicketAggregator::new(source, StatusTable::freshdesk(), Default::default());
//! ```

mod mock_ticket_source;

pub use mock_ticket_source::{MockTicketSource, RecordedPage};

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::json;

    use crate::ticket::Ticket;

    /// A ticket with the given id, company and status code.
    pub fn ticket(id: u64, company: &str, status: u64) -> Ticket {
        Ticket::try_from(json!({
            "id": id,
            "subject": format!("Ticket {}", id),
            "status": status,
            "priority": 1,
            "custom_fields": {
                "cf_empresa": company,
            },
        }))
        .expect("fixture ticket is a JSON object")
    }

    /// `count` consecutive tickets starting at `first_id`, all for `company`.
    pub fn page(first_id: u64, count: usize, company: &str, status: u64) -> Vec<Ticket> {
        (0..count as u64)
            .map(|offset| ticket(first_id + offset, company, status))
            .collect()
    }
}
