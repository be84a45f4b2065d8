//! Mock ticket source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::freshdesk::{FreshdeskError, TicketSource};
use crate::ticket::Ticket;

/// A recorded page request for test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedPage {
    pub page: u32,
    pub per_page: u32,
}

/// Mock implementation of the TicketSource trait.
///
/// Serves scripted pages (page `n` is `pages[n - 1]`, anything past the end
/// is empty), records every request and can fail once on a chosen page.
///
/// # Example
///
/// ```rust,ignore
/// use deskproxy_core::testing::{fixtures, MockTicketSource};
///
/// let source = MockTicketSource::with_pages(vec![
///     fixtures::page(1, 100, "Acme", 2),
///     fixtures::page(101, 37, "Acme", 2),
/// ]);
/// source.fail_on_page(2, FreshdeskError::Timeout(30)).await;
/// ```
#[derive(Debug, Default)]
pub struct MockTicketSource {
    pages: Arc<RwLock<Vec<Vec<Ticket>>>>,
    /// Served for every page when set.
    endless_page: Option<Vec<Ticket>>,
    requests: Arc<RwLock<Vec<RecordedPage>>>,
    failure: Arc<RwLock<Option<(u32, FreshdeskError)>>>,
}

impl MockTicketSource {
    /// Create a mock whose first page is empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock serving the given pages in order.
    pub fn with_pages(pages: Vec<Vec<Ticket>>) -> Self {
        Self {
            pages: Arc::new(RwLock::new(pages)),
            ..Self::default()
        }
    }

    /// Create a mock that returns `page` for every page number.
    pub fn endless(page: Vec<Ticket>) -> Self {
        Self {
            endless_page: Some(page),
            ..Self::default()
        }
    }

    /// Replace the scripted pages.
    pub async fn set_pages(&self, pages: Vec<Vec<Ticket>>) {
        *self.pages.write().await = pages;
    }

    /// Fail the next request for `page` with `error`.
    pub async fn fail_on_page(&self, page: u32, error: FreshdeskError) {
        *self.failure.write().await = Some((page, error));
    }

    /// Page numbers requested so far, in order.
    pub async fn requested_pages(&self) -> Vec<u32> {
        self.requests.read().await.iter().map(|r| r.page).collect()
    }

    /// Page sizes requested so far, in order.
    pub async fn requested_page_sizes(&self) -> Vec<u32> {
        self.requests.read().await.iter().map(|r| r.per_page).collect()
    }

    /// Number of page requests made.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl TicketSource for MockTicketSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_tickets(&self, page: u32, per_page: u32) -> Result<Vec<Ticket>, FreshdeskError> {
        self.requests
            .write()
            .await
            .push(RecordedPage { page, per_page });

        {
            let mut failure = self.failure.write().await;
            if matches!(*failure, Some((failing_page, _)) if failing_page == page) {
                if let Some((_, error)) = failure.take() {
                    return Err(error);
                }
            }
        }

        if let Some(page_tickets) = &self.endless_page {
            return Ok(page_tickets.clone());
        }

        let pages = self.pages.read().await;
        let index = page.saturating_sub(1) as usize;
        Ok(pages.get(index).cloned().unwrap_or_default())
    }
}
