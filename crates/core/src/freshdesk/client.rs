//! Freshdesk REST API client.
//!
//! Authenticates with HTTP Basic auth using the API key as user name and
//! the literal `x` as password.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use super::{FreshdeskError, TicketSource};
use crate::config::FreshdeskConfig;
use crate::ticket::Ticket;

/// Freshdesk API client.
pub struct FreshdeskClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout_secs: u32,
}

impl FreshdeskClient {
    /// Create a new Freshdesk client.
    pub fn new(config: &FreshdeskConfig) -> Result<Self, FreshdeskError> {
        if config.domain.trim().is_empty() && config.base_url.is_none() {
            return Err(FreshdeskError::NotConfigured(
                "Freshdesk domain is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.resolved_base_url(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tickets_url(&self) -> String {
        format!("{}/api/v2/tickets", self.base_url)
    }
}

#[async_trait]
impl TicketSource for FreshdeskClient {
    fn name(&self) -> &str {
        "freshdesk"
    }

    async fn list_tickets(&self, page: u32, per_page: u32) -> Result<Vec<Ticket>, FreshdeskError> {
        let url = self.tickets_url();

        debug!("Freshdesk list tickets: page={}, per_page={}", page, per_page);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.api_key, Some("x"))
            .header(CONTENT_TYPE, "application/json")
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FreshdeskError::Timeout(self.timeout_secs)
                } else {
                    FreshdeskError::HttpError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FreshdeskError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json::<Vec<Ticket>>().await.map_err(|e| {
            if e.is_timeout() {
                FreshdeskError::Timeout(self.timeout_secs)
            } else {
                FreshdeskError::ParseError(format!("Failed to parse tickets page {}: {}", page, e))
            }
        })
    }
}
