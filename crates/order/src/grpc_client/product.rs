use crate::{
    abstract_trait::grpc_client::ProductGrpcClientTrait,
    domain::response::product::ProductResponse,
};
use async_trait::async_trait;
use genproto::product::{
    GetProductsRequest, product_service_client::ProductServiceClient as ProductServiceGrpcClient,
};
use opentelemetry::Context;
use shared::{errors::ServiceError, utils::inject_trace_context};
use tonic::{Request, transport::Channel};
use tracing::{error, info};

pub struct ProductGrpcClientService {
    client: ProductServiceGrpcClient<Channel>,
}

impl ProductGrpcClientService {
    pub fn new(client: ProductServiceGrpcClient<Channel>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductGrpcClientTrait for ProductGrpcClientService {
    async fn find_by_ids(
        &self,
        cx: &Context,
        ids: &[String],
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        let mut req = Request::new(GetProductsRequest {
            skip: 0,
            take: ids.len() as u64,
            ids: ids.to_vec(),
            query: String::new(),
        });

        inject_trace_context(cx, &mut req);

        let mut client = self.client.clone();

        let response = client.get_products(req).await.map_err(|status| {
            error!("❌ Product lookup failed: {status}");
            ServiceError::Upstream(format!(
                "product-service: {} - {}",
                status.code(),
                status.message()
            ))
        })?;

        let products: Vec<ProductResponse> = response
            .into_inner()
            .products
            .into_iter()
            .map(Into::into)
            .collect();

        info!(
            "📦 Resolved {} of {} requested products",
            products.len(),
            ids.len()
        );
        Ok(products)
    }
}
