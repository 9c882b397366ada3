use crate::{domain::requests::order::CreateOrderRecordRequest, model::order::OrderRecord};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Writes the order and all of its line items in one transaction.
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderRecord, RepositoryError>;
}
