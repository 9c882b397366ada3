use order::{
    abstract_trait::order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    domain::requests::order::{CreateOrderItemRecordRequest, CreateOrderRecordRequest},
    repository::order::{OrderCommandRepository, OrderQueryRepository},
};
use sqlx::PgPool;

fn record_request(account_id: &str, items: &[(&str, i32)]) -> CreateOrderRecordRequest {
    CreateOrderRecordRequest {
        account_id: account_id.into(),
        total_price: 25.0,
        items: items
            .iter()
            .map(|(id, q)| CreateOrderItemRecordRequest {
                product_id: id.to_string(),
                quantity: *q,
            })
            .collect(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres instance"]
async fn order_and_items_round_trip(pool: PgPool) {
    let command = OrderCommandRepository::new(pool.clone());
    let query = OrderQueryRepository::new(pool);

    let created = command
        .create_order(&record_request("42", &[("P2", 1), ("P1", 2)]))
        .await
        .expect("order written");
    command
        .create_order(&record_request("7", &[("P1", 1)]))
        .await
        .expect("other account");

    let orders = query.find_by_account("42").await.expect("orders");

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order.order_id, created.order.order_id);
    assert_eq!(orders[0].order.total_price, 25.0);

    let items: Vec<(&str, i32)> = orders[0]
        .items
        .iter()
        .map(|i| (i.product_id.as_str(), i.quantity))
        .collect();
    assert_eq!(items, vec![("P1", 2), ("P2", 1)]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres instance"]
async fn failing_item_insert_rolls_back_the_order(pool: PgPool) {
    let command = OrderCommandRepository::new(pool.clone());
    let query = OrderQueryRepository::new(pool);

    // quantity 0 violates the CHECK constraint on the second insert
    let result = command
        .create_order(&record_request("42", &[("P1", 1), ("P2", 0)]))
        .await;

    assert!(result.is_err());
    assert!(query.find_by_account("42").await.expect("orders").is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres instance"]
async fn long_opaque_ids_are_stored_as_given(pool: PgPool) {
    let command = OrderCommandRepository::new(pool.clone());
    let query = OrderQueryRepository::new(pool);

    let account_id = format!("acct-{}", "a".repeat(120));
    let product_id = format!("prod-{}", "p".repeat(200));

    command
        .create_order(&record_request(&account_id, &[(product_id.as_str(), 3)]))
        .await
        .expect("long ids written");

    let orders = query.find_by_account(&account_id).await.expect("orders");

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order.account_id, account_id);
    assert_eq!(orders[0].items[0].product_id, product_id);
}
