use crate::{
    domain::response::{api::ApiResponse, order::OrderResponse},
    guard::CallerIdentity,
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_by_account(
        &self,
        caller: &CallerIdentity,
        account_id: &str,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
}
