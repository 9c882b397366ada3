use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderItemEvent {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum OrderEvent {
    Created {
        order_id: i32,
        account_id: String,
        total_price: f64,
        items: Vec<OrderItemEvent>,
    },
}

impl OrderEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            OrderEvent::Created { .. } => "order.created",
        }
    }
}
