use crate::{domain::response::account::AccountResponse, guard::CallerIdentity};
use async_trait::async_trait;
use opentelemetry::Context;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynAccountGrpcClient = Arc<dyn AccountGrpcClientTrait + Send + Sync>;

#[async_trait]
pub trait AccountGrpcClientTrait {
    /// Confirms the account exists. The caller identity is forwarded so the
    /// account service can apply its own checks.
    async fn find_by_id(
        &self,
        cx: &Context,
        id: &str,
        caller: &CallerIdentity,
    ) -> Result<AccountResponse, ServiceError>;
}
