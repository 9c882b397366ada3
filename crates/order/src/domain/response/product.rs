use genproto::product::Product as ProductProto;
use serde::{Deserialize, Serialize};

/// Catalog snapshot of a product at the time it was resolved. Never stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl From<ProductProto> for ProductResponse {
    fn from(value: ProductProto) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
        }
    }
}
