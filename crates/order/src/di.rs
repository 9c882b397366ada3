use crate::{
    abstract_trait::grpc_client::{DynAccountGrpcClient, DynProductGrpcClient},
    grpc_client::{
        GrpcClients, account::AccountGrpcClientService, product::ProductGrpcClientService,
    },
    repository::order::{OrderCommandRepository, OrderQueryRepository},
    service::order::{
        MissingProductPolicy, OrderCommandService, OrderCommandServiceDeps, OrderQueryService,
    },
};
use prometheus_client::registry::Registry;
use shared::{abstract_trait::DynKafka, config::ConnectionPool};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_query: OrderQueryService,
    pub order_command: OrderCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_query", &"OrderQueryService")
            .field("order_command", &"OrderCommandService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub kafka: DynKafka,
    pub policy: MissingProductPolicy,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, clients: GrpcClients, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            pool,
            kafka,
            policy,
        } = deps;

        let order_query_repo = Arc::new(OrderQueryRepository::new(pool.clone()));
        let order_command_repo = Arc::new(OrderCommandRepository::new(pool));

        let account_client: DynAccountGrpcClient =
            Arc::new(AccountGrpcClientService::new(clients.account_client));
        let product_client: DynProductGrpcClient =
            Arc::new(ProductGrpcClientService::new(clients.product_client));

        let order_query = OrderQueryService::new(order_query_repo, product_client.clone(), registry);

        let order_command_deps = OrderCommandServiceDeps {
            account_client,
            product_client,
            command: order_command_repo,
            kafka,
            policy,
        };

        let order_command = OrderCommandService::new(order_command_deps, registry);

        Self {
            order_query,
            order_command,
        }
    }
}
