use crate::model::order_item::OrderItem;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub account_id: String,
    pub total_price: f64,
    pub created_at: NaiveDateTime,
}

/// An order row together with every line-item row that belongs to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
