pub mod account;
pub mod product;

use crate::config::grpc_config::GrpcClientConfig;
use anyhow::{Context, Result};
use genproto::{
    account::account_service_client::AccountServiceClient,
    product::product_service_client::ProductServiceClient,
};
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tracing::info;

#[derive(Clone)]
pub struct GrpcClients {
    pub account_client: AccountServiceClient<Channel>,
    pub product_client: ProductServiceClient<Channel>,
}

impl GrpcClients {
    pub async fn init(config: GrpcClientConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let account_channel = Self::connect(config.account, "account-service", timeout).await?;
        let product_channel = Self::connect(config.product, "product-service", timeout).await?;

        Ok(Self {
            account_client: AccountServiceClient::new(account_channel),
            product_client: ProductServiceClient::new(product_channel),
        })
    }

    async fn connect(addr: String, service: &str, timeout: Duration) -> Result<Channel> {
        let endpoint = Endpoint::from_shared(addr.clone())
            .with_context(|| format!("Invalid gRPC address for {service}: {addr}"))?;

        let configured_endpoint = endpoint
            .connect_timeout(Duration::from_secs(3))
            .timeout(timeout)
            .http2_keep_alive_interval(Duration::from_secs(30))
            .keep_alive_timeout(Duration::from_secs(5))
            .initial_connection_window_size(1_048_576)
            .initial_stream_window_size(1_048_576);

        let channel = configured_endpoint
            .connect()
            .await
            .with_context(|| format!("Failed to connect to {service} at {addr}"))?;

        info!("🔌 Connected to {service} at {addr}");
        Ok(channel)
    }
}
