use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct GrpcClientConfig {
    pub account: String,
    pub product: String,
    pub timeout_secs: u64,
}

impl GrpcClientConfig {
    pub fn init() -> Result<Self> {
        let account = std::env::var("GRPC_ACCOUNT_ADDR")
            .context("Missing environment variable: GRPC_ACCOUNT_ADDR")?;

        let product = std::env::var("GRPC_PRODUCT_ADDR")
            .context("Missing environment variable: GRPC_PRODUCT_ADDR")?;

        let timeout_secs = std::env::var("GRPC_CLIENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u64>()
            .context("Unable to parse GRPC_CLIENT_TIMEOUT_SECS as u64")?;

        Ok(Self {
            account,
            product,
            timeout_secs,
        })
    }
}
