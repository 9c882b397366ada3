use crate::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    domain::requests::order::CreateOrderRecordRequest,
    model::{
        order::{Order as OrderModel, OrderRecord},
        order_item::OrderItem as OrderItemModel,
    },
};
use shared::{config::ConnectionPool, errors::RepositoryError};

use async_trait::async_trait;
use tracing::{error, info};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderRecord, RepositoryError> {
        // rolled back on drop unless committed below
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (account_id, total_price, created_at)
            VALUES ($1, $2, current_timestamp)
            RETURNING order_id, account_id, total_price, created_at
            "#,
        )
        .bind(&req.account_id)
        .bind(req.total_price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create order for account {}: {:?}",
                req.account_id, err
            );
            RepositoryError::from(err)
        })?;

        let mut items = Vec::with_capacity(req.items.len());

        for item in &req.items {
            let row = sqlx::query_as::<_, OrderItemModel>(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity)
                VALUES ($1, $2, $3)
                RETURNING order_item_id, order_id, product_id, quantity
                "#,
            )
            .bind(order.order_id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to add product {} to order {}: {:?}",
                    item.product_id, order.order_id, err
                );
                RepositoryError::from(err)
            })?;

            items.push(row);
        }

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit order {}: {:?}", order.order_id, err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created order ID {} for account {} with {} items",
            order.order_id,
            order.account_id,
            items.len()
        );

        Ok(OrderRecord { order, items })
    }
}
