use crate::{
    abstract_trait::order::service::DynOrderCommandService,
    domain::requests::order::{
        CreateOrderItemRequest as DomainCreateOrderItemRequest,
        CreateOrderRequest as DomainCreateOrderRequest,
    },
    guard::CallerIdentity,
};
use genproto::order::{
    ApiResponseOrder, CreateOrderRequest, order_command_service_server::OrderCommandService,
};
use shared::errors::AppErrorGrpc;
use std::fmt;
use tonic::{Request, Response, Status};
use tracing::info;

#[derive(Clone)]
pub struct OrderCommandGrpcServiceImpl {
    pub order_command_service: DynOrderCommandService,
}

impl fmt::Debug for OrderCommandGrpcServiceImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderCommandGrpcServiceImpl")
            .field("order_command_service", &"DynOrderCommandService")
            .finish()
    }
}

impl OrderCommandGrpcServiceImpl {
    pub fn new(order: DynOrderCommandService) -> Self {
        Self {
            order_command_service: order,
        }
    }
}

#[tonic::async_trait]
impl OrderCommandService for OrderCommandGrpcServiceImpl {
    async fn create(
        &self,
        request: Request<CreateOrderRequest>,
    ) -> Result<Response<ApiResponseOrder>, Status> {
        info!("Creating new order");

        let caller =
            CallerIdentity::from_metadata(request.metadata()).map_err(AppErrorGrpc::from)?;

        let req = request.into_inner();

        let items = req
            .items
            .into_iter()
            .map(|i| DomainCreateOrderItemRequest {
                product_id: i.product_id,
                quantity: i.quantity,
            })
            .collect::<Vec<_>>();

        let domain_req = DomainCreateOrderRequest {
            account_id: req.account_id,
            items,
        };

        let api_response = self
            .order_command_service
            .create_order(&caller, &domain_req)
            .await
            .map_err(AppErrorGrpc::from)?;

        let order_id = api_response.data.id;

        let reply = ApiResponseOrder {
            status: "success".into(),
            message: api_response.message,
            data: Some(api_response.data.into()),
        };

        info!("Order created successfully with ID: {order_id}");
        Ok(Response::new(reply))
    }
}
