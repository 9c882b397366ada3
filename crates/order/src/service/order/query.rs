use crate::{
    abstract_trait::{
        grpc_client::DynProductGrpcClient,
        order::{repository::DynOrderQueryRepository, service::OrderQueryServiceTrait},
    },
    domain::response::{api::ApiResponse, order::OrderResponse, product::ProductResponse},
    guard::CallerIdentity,
};
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};

use async_trait::async_trait;
use opentelemetry::{Context, KeyValue};
use prometheus_client::registry::Registry;
use std::collections::{BTreeSet, HashMap};
use tracing::info;

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    product_client: DynProductGrpcClient,
    metrics: Metrics,
}

impl OrderQueryService {
    pub fn new(
        query: DynOrderQueryRepository,
        product_client: DynProductGrpcClient,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "order_query_service", "OrderQueryService");

        Self {
            query,
            product_client,
            metrics,
        }
    }

    async fn orders_for_account(
        &self,
        cx: &Context,
        caller: &CallerIdentity,
        account_id: &str,
    ) -> Result<Vec<OrderResponse>, ServiceError> {
        caller.ensure_self(account_id)?;

        let records = self.query.find_by_account(account_id).await?;

        let mut orders: Vec<OrderResponse> = records.into_iter().map(Into::into).collect();

        let product_ids: BTreeSet<&str> = orders
            .iter()
            .flat_map(|order| order.items.iter().map(|item| item.product_id.as_str()))
            .collect();

        if product_ids.is_empty() {
            return Ok(orders);
        }

        let product_ids: Vec<String> = product_ids.into_iter().map(str::to_owned).collect();
        let products = self.product_client.find_by_ids(cx, &product_ids).await?;

        let catalog: HashMap<String, ProductResponse> = products
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();

        for item in orders.iter_mut().flat_map(|order| order.items.iter_mut()) {
            item.decorate(catalog.get(&item.product_id));
        }

        Ok(orders)
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_by_account(
        &self,
        caller: &CallerIdentity,
        account_id: &str,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        info!("🔍 Retrieving orders for account_id={account_id}");

        let method = Method::Get;

        let tracing_ctx = TracingContext::start(
            "order-query-service",
            "find_by_account",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "find_by_account"),
                KeyValue::new("account.id", account_id.to_string()),
            ],
        );

        match self.orders_for_account(&tracing_ctx.cx, caller, account_id).await {
            Ok(orders) => {
                tracing_ctx.complete_success(
                    &self.metrics,
                    method,
                    &format!("Found {} orders", orders.len()),
                );

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "Orders retrieved successfully".to_string(),
                    data: orders,
                })
            }
            Err(err) => {
                tracing_ctx.complete_error(
                    &self.metrics,
                    method,
                    &format!("Failed to retrieve orders: {err}"),
                );
                Err(err)
            }
        }
    }
}
