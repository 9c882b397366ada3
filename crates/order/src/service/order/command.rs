use crate::{
    abstract_trait::{
        grpc_client::{DynAccountGrpcClient, DynProductGrpcClient},
        order::{repository::DynOrderCommandRepository, service::OrderCommandServiceTrait},
    },
    domain::{
        event::{OrderEvent, OrderItemEvent},
        requests::order::{
            CreateOrderItemRecordRequest, CreateOrderRecordRequest, CreateOrderRequest,
        },
        response::{api::ApiResponse, order::OrderResponse},
    },
    guard::CallerIdentity,
    model::order::OrderRecord,
    service::order::{
        line_items::{PricedLineItem, aggregate_line_items, total_price},
        policy::MissingProductPolicy,
    },
};
use shared::{
    abstract_trait::DynKafka,
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};

use async_trait::async_trait;
use opentelemetry::{Context, KeyValue};
use prometheus_client::registry::Registry;
use std::collections::HashMap;
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct OrderCommandService {
    account_client: DynAccountGrpcClient,
    product_client: DynProductGrpcClient,
    command: DynOrderCommandRepository,
    kafka: DynKafka,
    policy: MissingProductPolicy,
    metrics: Metrics,
}

pub struct OrderCommandServiceDeps {
    pub account_client: DynAccountGrpcClient,
    pub product_client: DynProductGrpcClient,
    pub command: DynOrderCommandRepository,
    pub kafka: DynKafka,
    pub policy: MissingProductPolicy,
}

impl OrderCommandService {
    pub fn new(deps: OrderCommandServiceDeps, registry: &mut Registry) -> Self {
        let OrderCommandServiceDeps {
            account_client,
            product_client,
            command,
            kafka,
            policy,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(registry, "order_command_service", "OrderCommandService");

        Self {
            account_client,
            product_client,
            command,
            kafka,
            policy,
            metrics,
        }
    }

    async fn place_order(
        &self,
        cx: &Context,
        caller: &CallerIdentity,
        req: &CreateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        caller.ensure_self(&req.account_id)?;

        req.validate()?;

        let quantities = aggregate_line_items(&req.items)?;
        let product_ids: Vec<String> = quantities.keys().cloned().collect();

        let (account, products) = tokio::join!(
            self.account_client
                .find_by_id(cx, &req.account_id, caller),
            self.product_client.find_by_ids(cx, &product_ids),
        );

        account?;
        let priced = self.policy.apply(&quantities, products?)?;

        let record_req = CreateOrderRecordRequest {
            account_id: req.account_id.clone(),
            total_price: total_price(&priced),
            items: priced
                .iter()
                .map(|item| CreateOrderItemRecordRequest {
                    product_id: item.product.id.clone(),
                    quantity: item.quantity,
                })
                .collect(),
        };

        let record = self.command.create_order(&record_req).await?;

        self.publish_created(&record);

        Ok(decorate(record, &priced))
    }

    fn publish_created(&self, record: &OrderRecord) {
        let event = OrderEvent::Created {
            order_id: record.order.order_id,
            account_id: record.order.account_id.clone(),
            total_price: record.order.total_price,
            items: record
                .items
                .iter()
                .map(|item| OrderItemEvent {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                })
                .collect(),
        };

        let payload = match serde_json::to_vec(&event) {
            Ok(payload) => payload,
            Err(err) => {
                error!("❌ Failed to serialize order event: {err}");
                return;
            }
        };

        let kafka = self.kafka.clone();
        let key = record.order.order_id.to_string();

        tokio::spawn(async move {
            match kafka.publish(event.topic(), &key, &payload).await {
                Ok(()) => info!("📨 Published {} for order {key}", event.topic()),
                Err(err) => error!("❌ Failed to publish {} for order {key}: {err}", event.topic()),
            }
        });
    }
}

fn decorate(record: OrderRecord, priced: &[PricedLineItem]) -> OrderResponse {
    let catalog: HashMap<&str, &PricedLineItem> = priced
        .iter()
        .map(|item| (item.product.id.as_str(), item))
        .collect();

    let mut response = OrderResponse::from(record);
    for item in &mut response.items {
        let product = catalog
            .get(item.product_id.as_str())
            .map(|priced| &priced.product);
        item.decorate(product);
    }

    response
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        caller: &CallerIdentity,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🏗️ Creating new order for account_id={}", req.account_id);

        let method = Method::Post;

        let tracing_ctx = TracingContext::start(
            "order-command-service",
            "create_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "create"),
                KeyValue::new("account.id", req.account_id.clone()),
                KeyValue::new("items.count", req.items.len() as i64),
            ],
        );

        match self.place_order(&tracing_ctx.cx, caller, req).await {
            Ok(order) => {
                tracing_ctx.complete_success(
                    &self.metrics,
                    method,
                    &format!("Order {} created", order.id),
                );

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "Order created successfully".to_string(),
                    data: order,
                })
            }
            Err(err) => {
                tracing_ctx.complete_error(
                    &self.metrics,
                    method,
                    &format!("Failed to create order: {err}"),
                );
                Err(err)
            }
        }
    }
}
