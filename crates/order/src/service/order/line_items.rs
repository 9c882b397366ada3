use crate::domain::{
    requests::order::CreateOrderItemRequest, response::product::ProductResponse,
};
use shared::errors::ServiceError;
use std::collections::BTreeMap;

/// A line item whose product was found in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLineItem {
    pub product: ProductResponse,
    pub quantity: i32,
}

impl PricedLineItem {
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Folds repeated products into one entry with the summed quantity.
///
/// Keys come back sorted, so the same multiset of requested items always
/// produces the same line items regardless of input order.
pub fn aggregate_line_items(
    items: &[CreateOrderItemRequest],
) -> Result<BTreeMap<String, i32>, ServiceError> {
    let mut quantities: BTreeMap<String, i32> = BTreeMap::new();

    for item in items {
        let entry = quantities.entry(item.product_id.clone()).or_insert(0);
        *entry = entry.checked_add(item.quantity).ok_or_else(|| {
            ServiceError::Validation(vec![format!(
                "quantity for product {} is too large",
                item.product_id
            )])
        })?;
    }

    Ok(quantities)
}

/// Sum of unit price times quantity, no rounding.
pub fn total_price(items: &[PricedLineItem]) -> f64 {
    items.iter().map(PricedLineItem::subtotal).sum()
}
