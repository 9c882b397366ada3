use crate::{
    config::{grpc_config::GrpcClientConfig, myconfig::Config},
    di::{DependenciesInject, DependenciesInjectDeps},
    grpc_client::GrpcClients,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynKafka,
    config::{ConnectionPool, Kafka},
};
use std::{fmt, sync::Arc};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    pub pool: ConnectionPool,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("registry", &self.registry)
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let kafka = Kafka::new(&config.kafka_broker).context("Failed to create Kafka producer")?;
        let kafka = Arc::new(kafka) as DynKafka;

        let mut registry = Registry::default();

        let grpc_config = GrpcClientConfig::init().context("failed config grpc")?;

        let clients = GrpcClients::init(grpc_config)
            .await
            .context("failed grpc client")?;

        let deps = DependenciesInjectDeps {
            pool: pool.clone(),
            kafka,
            policy: config.missing_product_policy,
        };

        let di_container = DependenciesInject::new(deps, clients, &mut registry);

        info!(
            "🧩 Dependencies ready, missing product policy: {}",
            config.missing_product_policy
        );

        Ok(Self {
            di_container,
            registry: Arc::new(registry),
            pool,
        })
    }
}
