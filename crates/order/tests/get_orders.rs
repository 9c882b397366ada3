mod support;

use order::abstract_trait::order::service::{OrderCommandServiceTrait, OrderQueryServiceTrait};
use prometheus_client::encoding::text::encode;
use shared::errors::ServiceError;
use std::sync::atomic::Ordering;
use support::{Harness, caller, item, order_request, product};

async fn place(h: &Harness, account_id: &str, items: Vec<(&str, i32)>) -> i32 {
    let items = items.into_iter().map(|(id, q)| item(id, q)).collect();

    h.command
        .create_order(&caller(account_id), &order_request(account_id, items))
        .await
        .expect("order placed")
        .data
        .id
}

#[tokio::test]
async fn reading_another_accounts_orders_is_denied_without_a_read() {
    let h = Harness::builder().build();

    let result = h.query.find_by_account(&caller("42"), "99").await;

    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    assert_eq!(h.store.reads.load(Ordering::SeqCst), 0);
    assert_eq!(h.products.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn orders_come_back_decorated_and_ordered() {
    let h = Harness::builder()
        .products(vec![product("P1", 10.0), product("P2", 5.0), product("P3", 1.5)])
        .build();

    let first = place(&h, "42", vec![("P2", 1), ("P1", 2)]).await;
    let second = place(&h, "42", vec![("P3", 4)]).await;
    place(&h, "7", vec![("P1", 1)]).await;

    let calls_before = h.products.calls.load(Ordering::SeqCst);

    let response = h
        .query
        .find_by_account(&caller("42"), "42")
        .await
        .expect("orders");

    let ids: Vec<i32> = response.data.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![first, second]);

    let first_items: Vec<&str> = response.data[0]
        .items
        .iter()
        .map(|i| i.product_id.as_str())
        .collect();
    assert_eq!(first_items, vec!["P1", "P2"]);
    assert_eq!(response.data[0].items[0].name.as_deref(), Some("Product P1"));
    assert_eq!(response.data[1].items[0].price, Some(1.5));

    // one batch lookup for the distinct products across all orders
    assert_eq!(h.products.calls.load(Ordering::SeqCst), calls_before + 1);
    let requested = h.products.requested.lock().expect("requested lock");
    let last = requested.last().expect("a lookup");
    assert_eq!(last, &vec!["P1".to_string(), "P2".to_string(), "P3".to_string()]);
}

#[tokio::test]
async fn repeated_reads_return_identical_output() {
    let h = Harness::builder().build();
    place(&h, "42", vec![("P1", 2), ("P2", 1)]).await;
    place(&h, "42", vec![("P2", 3)]).await;

    let first = h
        .query
        .find_by_account(&caller("42"), "42")
        .await
        .expect("first read");
    let second = h
        .query
        .find_by_account(&caller("42"), "42")
        .await
        .expect("second read");

    assert_eq!(first, second);
}

#[tokio::test]
async fn product_removed_from_catalog_leaves_empty_decoration() {
    let h = Harness::builder().build();
    place(&h, "42", vec![("P1", 2), ("P2", 1)]).await;

    h.products.remove("P2");

    let response = h
        .query
        .find_by_account(&caller("42"), "42")
        .await
        .expect("orders");

    let items = &response.data[0].items;
    assert_eq!(items[0].name.as_deref(), Some("Product P1"));
    assert_eq!(items[1].product_id, "P2");
    assert_eq!(items[1].quantity, 1);
    assert_eq!(items[1].name, None);
    assert_eq!(items[1].description, None);
    assert_eq!(items[1].price, None);
}

#[tokio::test]
async fn no_orders_means_no_catalog_lookup() {
    let h = Harness::builder().build();

    let response = h
        .query
        .find_by_account(&caller("42"), "42")
        .await
        .expect("orders");

    assert!(response.data.is_empty());
    assert_eq!(h.store.reads.load(Ordering::SeqCst), 1);
    assert_eq!(h.products.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn catalog_outage_during_read_is_upstream_unavailable() {
    let h = Harness::builder().build();
    place(&h, "42", vec![("P1", 1)]).await;
    h.products.set_down(true);

    let result = h.query.find_by_account(&caller("42"), "42").await;

    assert!(matches!(result, Err(ServiceError::Upstream(_))));
}

#[tokio::test]
async fn requests_are_counted_per_service() {
    let h = Harness::builder().build();
    place(&h, "42", vec![("P1", 1)]).await;
    let _ = h.query.find_by_account(&caller("42"), "99").await;

    let mut buffer = String::new();
    encode(&mut buffer, &h.registry).expect("encode metrics");

    assert!(buffer.contains("order_command_service_request_counter_total{method=\"Post\",status=\"Success\"} 1"));
    assert!(buffer.contains("order_query_service_request_counter_total{method=\"Get\",status=\"Error\"} 1"));
}
