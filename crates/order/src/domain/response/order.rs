use crate::{
    domain::response::product::ProductResponse,
    model::{order::OrderRecord, order_item::OrderItem as OrderItemModel},
};
use genproto::order::{
    OrderItemResponse as OrderItemResponseProto, OrderResponse as OrderResponseProto,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderItemResponse {
    #[serde(rename = "product_id")]
    pub product_id: String,
    pub quantity: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl OrderItemResponse {
    /// Copies display data from the catalog. A product that is gone from the
    /// catalog leaves the fields empty.
    pub fn decorate(&mut self, product: Option<&ProductResponse>) {
        match product {
            Some(product) => {
                self.name = Some(product.name.clone());
                self.description = Some(product.description.clone());
                self.price = Some(product.price);
            }
            None => {
                self.name = None;
                self.description = None;
                self.price = None;
            }
        }
    }
}

// model to response
impl From<OrderItemModel> for OrderItemResponse {
    fn from(value: OrderItemModel) -> Self {
        OrderItemResponse {
            product_id: value.product_id,
            quantity: value.quantity,
            name: None,
            description: None,
            price: None,
        }
    }
}

// response to proto
impl From<OrderItemResponse> for OrderItemResponseProto {
    fn from(value: OrderItemResponse) -> Self {
        OrderItemResponseProto {
            product_id: value.product_id,
            name: value.name.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
            price: value.price.unwrap_or_default(),
            quantity: value.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderResponse {
    pub id: i32,
    #[serde(rename = "account_id")]
    pub account_id: String,
    #[serde(rename = "total_price")]
    pub total_price: f64,
    #[serde(rename = "created_at")]
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

// model to response, line items undecorated
impl From<OrderRecord> for OrderResponse {
    fn from(value: OrderRecord) -> Self {
        OrderResponse {
            id: value.order.order_id,
            account_id: value.order.account_id,
            total_price: value.order.total_price,
            created_at: value.order.created_at.and_utc().to_rfc3339(),
            items: value
                .items
                .into_iter()
                .map(OrderItemResponse::from)
                .collect(),
        }
    }
}

// response to proto
impl From<OrderResponse> for OrderResponseProto {
    fn from(value: OrderResponse) -> Self {
        OrderResponseProto {
            id: value.id,
            account_id: value.account_id,
            total_price: value.total_price,
            created_at: value.created_at,
            items: value.items.into_iter().map(Into::into).collect(),
        }
    }
}
