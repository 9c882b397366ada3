use crate::{
    abstract_trait::order::repository::OrderQueryRepositoryTrait,
    model::{
        order::{Order as OrderModel, OrderRecord},
        order_item::OrderItem as OrderItemModel,
    },
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use std::collections::HashMap;
use tracing::{error, info};

pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_by_account(&self, account_id: &str) -> Result<Vec<OrderRecord>, RepositoryError> {
        info!("🔍 Fetching orders for account {account_id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let orders = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT order_id, account_id, total_price, created_at
            FROM orders
            WHERE account_id = $1
            ORDER BY order_id
            "#,
        )
        .bind(account_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch orders for account {account_id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = orders.iter().map(|o| o.order_id).collect();

        let rows = sqlx::query_as::<_, OrderItemModel>(
            r#"
            SELECT order_item_id, order_id, product_id, quantity
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY order_id, product_id
            "#,
        )
        .bind(&order_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch items for account {account_id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        let mut items_by_order: HashMap<i32, Vec<OrderItemModel>> = HashMap::new();
        for row in rows {
            items_by_order.entry(row.order_id).or_default().push(row);
        }

        let records: Vec<OrderRecord> = orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.order_id).unwrap_or_default();
                OrderRecord { order, items }
            })
            .collect();

        info!(
            "✅ Found {} orders for account {account_id}",
            records.len()
        );
        Ok(records)
    }
}
