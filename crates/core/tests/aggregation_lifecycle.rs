//! Aggregation driven through the public API, the way the server wires it.

use std::sync::Arc;

use deskproxy_core::testing::{fixtures, MockTicketSource};
use deskproxy_core::{
    load_config_from_str, validate_config, AggregatorError, AggregatorSettings, FreshdeskError,
    StatusTable, TicketAggregator,
};

fn aggregator_from_toml(toml: &str, source: Arc<MockTicketSource>) -> TicketAggregator {
    let config = load_config_from_str(toml).unwrap();
    validate_config(&config).unwrap();
    TicketAggregator::new(
        source,
        StatusTable::freshdesk(),
        AggregatorSettings::from(&config.freshdesk),
    )
}

#[tokio::test]
async fn test_three_pages_three_calls() {
    let source = Arc::new(MockTicketSource::with_pages(vec![
        fixtures::page(1, 100, "Acme", 2),
        fixtures::page(101, 100, "Acme", 4),
        fixtures::page(201, 37, "Acme", 18),
    ]));
    let aggregator = aggregator_from_toml("", Arc::clone(&source));

    let tickets = aggregator.tickets_for_company("Acme").await.unwrap();

    assert_eq!(tickets.len(), 237);
    assert_eq!(source.request_count().await, 3);
    assert_eq!(tickets[0].status_name(), Some("Open"));
    assert_eq!(tickets[100].status_name(), Some("Atribuído "));
    assert_eq!(tickets[236].status_name(), Some("Abertos"));
}

#[tokio::test]
async fn test_configured_page_size_and_guard() {
    let source = Arc::new(MockTicketSource::endless(fixtures::page(1, 20, "Acme", 2)));
    let aggregator = aggregator_from_toml(
        r#"
[freshdesk]
per_page = 20
max_pages = 3
"#,
        Arc::clone(&source),
    );

    let err = aggregator.tickets_for_company("Acme").await.unwrap_err();

    assert!(matches!(err, AggregatorError::PageLimitExceeded { max_pages: 3 }));
    assert_eq!(source.requested_page_sizes().await, vec![20, 20, 20]);
}

#[tokio::test]
async fn test_failure_after_success_returns_single_error() {
    let source = Arc::new(MockTicketSource::with_pages(vec![
        fixtures::page(1, 100, "Acme", 2),
        fixtures::page(101, 100, "Acme", 2),
        fixtures::page(201, 1, "Acme", 2),
    ]));
    source.fail_on_page(2, FreshdeskError::Timeout(30)).await;
    let aggregator = aggregator_from_toml("", Arc::clone(&source));

    let result = aggregator.tickets_for_company("Acme").await;

    match result {
        Err(AggregatorError::Upstream {
            page: 2,
            source: FreshdeskError::Timeout(30),
        }) => {}
        other => panic!("expected upstream timeout on page 2, got {:?}", other),
    }
    assert_eq!(source.requested_pages().await, vec![1, 2]);
}
