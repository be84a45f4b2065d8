//! Freshdesk upstream integration.
//!
//! The aggregator only sees the [`TicketSource`] trait so tests can swap the
//! HTTP client for a scripted source.

mod client;

pub use client::FreshdeskClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::ticket::Ticket;

/// Errors that can occur when talking to Freshdesk.
#[derive(Debug, Error)]
pub enum FreshdeskError {
    /// Transport-level failure (connection refused, TLS, body read).
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {0}s")]
    Timeout(u32),

    /// Freshdesk answered with a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Response body was not a JSON array of ticket objects.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client cannot be built from the given configuration.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// A paged listing of tickets.
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;

    /// Fetch one page of tickets. Pages are 1-based.
    async fn list_tickets(&self, page: u32, per_page: u32) -> Result<Vec<Ticket>, FreshdeskError>;
}
