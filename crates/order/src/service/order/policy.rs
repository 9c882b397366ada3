use crate::{
    domain::response::product::ProductResponse, service::order::line_items::PricedLineItem,
};
use shared::errors::ServiceError;
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    str::FromStr,
};
use tracing::warn;

/// What to do with a requested product the catalog does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingProductPolicy {
    /// Leave the line item out of the order.
    #[default]
    Drop,
    /// Fail the whole order.
    Reject,
}

impl MissingProductPolicy {
    /// Pairs each aggregated quantity with its catalog entry.
    ///
    /// The result is never empty: an order whose every product is unknown is a
    /// validation failure under either policy.
    pub fn apply(
        &self,
        quantities: &BTreeMap<String, i32>,
        products: Vec<ProductResponse>,
    ) -> Result<Vec<PricedLineItem>, ServiceError> {
        let mut catalog: HashMap<String, ProductResponse> = products
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();

        let mut priced = Vec::with_capacity(quantities.len());
        let mut missing = Vec::new();

        for (product_id, quantity) in quantities {
            match catalog.remove(product_id) {
                Some(product) => priced.push(PricedLineItem {
                    product,
                    quantity: *quantity,
                }),
                None => missing.push(product_id.as_str()),
            }
        }

        if !missing.is_empty() {
            match self {
                MissingProductPolicy::Reject => {
                    return Err(ServiceError::Validation(vec![format!(
                        "unknown products: {}",
                        missing.join(", ")
                    )]));
                }
                MissingProductPolicy::Drop => {
                    warn!("⚠️ Dropping unknown products: {}", missing.join(", "));
                }
            }
        }

        if priced.is_empty() {
            return Err(ServiceError::Validation(vec![
                "none of the requested products could be resolved".to_string(),
            ]));
        }

        Ok(priced)
    }
}

impl FromStr for MissingProductPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(MissingProductPolicy::Drop),
            "reject" => Ok(MissingProductPolicy::Reject),
            other => Err(format!(
                "missing product policy must be 'drop' or 'reject', got '{other}'"
            )),
        }
    }
}

impl fmt::Display for MissingProductPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingProductPolicy::Drop => f.write_str("drop"),
            MissingProductPolicy::Reject => f.write_str("reject"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64) -> ProductResponse {
        ProductResponse {
            id: id.into(),
            name: id.to_lowercase(),
            description: String::new(),
            price,
        }
    }

    fn quantities(pairs: &[(&str, i32)]) -> BTreeMap<String, i32> {
        pairs.iter().map(|(id, q)| (id.to_string(), *q)).collect()
    }

    #[test]
    fn drop_keeps_only_resolved_products() {
        let priced = MissingProductPolicy::Drop
            .apply(&quantities(&[("P1", 2), ("P2", 1)]), vec![product("P1", 10.0)])
            .expect("priced");

        assert_eq!(priced.len(), 1);
        assert_eq!(priced[0].product.id, "P1");
        assert_eq!(priced[0].quantity, 2);
    }

    #[test]
    fn reject_fails_on_any_unknown_product() {
        let result = MissingProductPolicy::Reject
            .apply(&quantities(&[("P1", 2), ("P2", 1)]), vec![product("P1", 10.0)]);

        match result {
            Err(ServiceError::Validation(errors)) => assert!(errors[0].contains("P2")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn nothing_resolved_is_a_validation_error() {
        let result = MissingProductPolicy::Drop.apply(&quantities(&[("P9", 1)]), Vec::new());

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn extra_catalog_entries_are_ignored() {
        let priced = MissingProductPolicy::Reject
            .apply(
                &quantities(&[("P1", 1)]),
                vec![product("P1", 1.0), product("P7", 3.0)],
            )
            .expect("priced");

        assert_eq!(priced.len(), 1);
    }

    #[test]
    fn parses_from_configuration() {
        assert_eq!("drop".parse(), Ok(MissingProductPolicy::Drop));
        assert_eq!(" Reject ".parse(), Ok(MissingProductPolicy::Reject));
        assert!("maybe".parse::<MissingProductPolicy>().is_err());
        assert_eq!(MissingProductPolicy::default(), MissingProductPolicy::Drop);
    }
}
