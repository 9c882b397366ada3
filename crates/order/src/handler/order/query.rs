use crate::{abstract_trait::order::service::DynOrderQueryService, guard::CallerIdentity};
use genproto::order::{
    ApiResponseOrders, FindByAccountRequest, order_query_service_server::OrderQueryService,
};
use shared::errors::AppErrorGrpc;
use std::fmt;
use tonic::{Request, Response, Status};
use tracing::info;

#[derive(Clone)]
pub struct OrderQueryGrpcServiceImpl {
    pub order_query_service: DynOrderQueryService,
}

impl fmt::Debug for OrderQueryGrpcServiceImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderQueryGrpcServiceImpl")
            .field("order_query_service", &"DynOrderQueryService")
            .finish()
    }
}

impl OrderQueryGrpcServiceImpl {
    pub fn new(order: DynOrderQueryService) -> Self {
        Self {
            order_query_service: order,
        }
    }
}

#[tonic::async_trait]
impl OrderQueryService for OrderQueryGrpcServiceImpl {
    async fn find_by_account(
        &self,
        request: Request<FindByAccountRequest>,
    ) -> Result<Response<ApiResponseOrders>, Status> {
        info!("Handling gRPC request: FindByAccount orders");

        let caller =
            CallerIdentity::from_metadata(request.metadata()).map_err(AppErrorGrpc::from)?;

        let req = request.into_inner();

        let api_response = self
            .order_query_service
            .find_by_account(&caller, &req.account_id)
            .await
            .map_err(AppErrorGrpc::from)?;

        let data: Vec<genproto::order::OrderResponse> =
            api_response.data.into_iter().map(Into::into).collect();

        let reply = ApiResponseOrders {
            status: "success".into(),
            message: api_response.message,
            data,
        };

        Ok(Response::new(reply))
    }
}
