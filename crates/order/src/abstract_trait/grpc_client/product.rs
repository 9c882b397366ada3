use crate::domain::response::product::ProductResponse;
use async_trait::async_trait;
use opentelemetry::Context;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductGrpcClient = Arc<dyn ProductGrpcClientTrait + Send + Sync>;

#[async_trait]
pub trait ProductGrpcClientTrait {
    /// One batch lookup. Ids unknown to the catalog are absent from the result.
    async fn find_by_ids(
        &self,
        cx: &Context,
        ids: &[String],
    ) -> Result<Vec<ProductResponse>, ServiceError>;
}
