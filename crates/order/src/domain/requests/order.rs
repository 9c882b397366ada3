use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "account_id must not be empty"))]
    #[serde(rename = "account_id")]
    pub account_id: String,

    #[validate(length(min = 1, message = "items must not be empty"), nested)]
    pub items: Vec<CreateOrderItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateOrderItemRequest {
    #[validate(length(min = 1, message = "product_id must not be empty"))]
    #[serde(rename = "product_id")]
    pub product_id: String,

    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateOrderRecordRequest {
    #[serde(rename = "account_id")]
    pub account_id: String,

    #[serde(rename = "total_price")]
    pub total_price: f64,

    pub items: Vec<CreateOrderItemRecordRequest>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CreateOrderItemRecordRequest {
    #[serde(rename = "product_id")]
    pub product_id: String,

    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, quantity: i32) -> CreateOrderItemRequest {
        CreateOrderItemRequest {
            product_id: product_id.into(),
            quantity,
        }
    }

    #[test]
    fn accepts_positive_quantities() {
        let req = CreateOrderRequest {
            account_id: "42".into(),
            items: vec![item("p1", 1), item("p2", 3)],
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_empty_items() {
        let req = CreateOrderRequest {
            account_id: "42".into(),
            items: vec![],
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_quantity_in_any_item() {
        for quantity in [0, -2] {
            let req = CreateOrderRequest {
                account_id: "42".into(),
                items: vec![item("p1", 2), item("p2", quantity)],
            };

            assert!(req.validate().is_err(), "quantity {quantity} accepted");
        }
    }

    #[test]
    fn rejects_blank_product_id() {
        let req = CreateOrderRequest {
            account_id: "42".into(),
            items: vec![item("", 1)],
        };

        assert!(req.validate().is_err());
    }
}
