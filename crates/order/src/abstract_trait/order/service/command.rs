use crate::{
    domain::{
        requests::order::CreateOrderRequest,
        response::{api::ApiResponse, order::OrderResponse},
    },
    guard::CallerIdentity,
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(
        &self,
        caller: &CallerIdentity,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
