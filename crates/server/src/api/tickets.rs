//! Ticket API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use deskproxy_core::{Ticket, COMPANY_FIELD};
use serde::Serialize;
use tracing::{error, info};

use super::handlers::TICKET_ENDPOINTS;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Query of `/api/tickets/client-by-empresa`.
///
/// Built from raw pairs so a repeated `cf_empresa` resolves to its first
/// value instead of failing extraction.
#[derive(Debug, Default)]
pub struct ClientByEmpresaQuery {
    pub cf_empresa: Option<String>,
}

impl ClientByEmpresaQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            cf_empresa: pairs
                .into_iter()
                .find(|(key, _)| key == COMPANY_FIELD)
                .map(|(_, value)| value),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cf_empresa: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TicketServiceStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub freshdesk_domain: String,
    pub endpoints: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub message: &'static str,
    pub test: bool,
    pub freshdesk_domain: String,
    pub endpoints: &'static [&'static str],
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tickets/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<TicketServiceStatus> {
    Json(TicketServiceStatus {
        status: "active",
        message: "Ticket service running",
        freshdesk_domain: state.freshdesk_domain().to_string(),
        endpoints: TICKET_ENDPOINTS,
    })
}

/// GET /api/tickets/client-by-empresa?cf_empresa=NAME
///
/// Every Freshdesk ticket whose `cf_empresa` equals the parameter, with
/// `status_name` added.
pub async fn client_by_empresa(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Ticket>>, (StatusCode, Json<ErrorResponse>)> {
    let company = match ClientByEmpresaQuery::from_pairs(pairs).cf_empresa {
        Some(company) if !company.is_empty() => company,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("{} is required", COMPANY_FIELD),
                    cf_empresa: None,
                }),
            ))
        }
    };

    match state.aggregator().tickets_for_company(&company).await {
        Ok(tickets) => {
            info!("Returning {} tickets for company '{}'", tickets.len(), company);
            Ok(Json(tickets))
        }
        Err(e) => {
            error!("Failed to fetch tickets for company '{}': {}", company, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Internal error: {}", e),
                    cf_empresa: Some(company),
                }),
            ))
        }
    }
}

/// GET /api/tickets/test
pub async fn test_endpoint(State(state): State<Arc<AppState>>) -> Json<TestResponse> {
    Json(TestResponse {
        message: "API working correctly",
        test: true,
        freshdesk_domain: state.freshdesk_domain().to_string(),
        endpoints: TICKET_ENDPOINTS,
    })
}
