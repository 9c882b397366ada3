use crate::model::order::OrderRecord;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_account(&self, account_id: &str) -> Result<Vec<OrderRecord>, RepositoryError>;
}
