use crate::service::order::MissingProductPolicy;
use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub grpc_port: u16,
    pub metric_port: u16,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub run_migrations: bool,
    pub order: ServiceConfig,
    pub kafka_broker: String,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub missing_product_policy: MissingProductPolicy,
    pub otel_endpoint: String,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;

        let kafka_broker = std::env::var("KAFKA").context("Missing environment variable: KAFKA")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let db_max_conn: u32 = std::env::var("DB_MAX_CONNECTION")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MAX_CONNECTION as u32")?;

        let db_min_conn: u32 = std::env::var("DB_MIN_CONNECTION")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MIN_CONNECTION as u32")?;

        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONNECTION ({db_min_conn}) must not exceed DB_MAX_CONNECTION ({db_max_conn})"
            ));
        }

        let order_grpc_port = std::env::var("ORDER_GRPC_PORT")
            .context("Missing environment variable: ORDER_GRPC_PORT")?
            .parse::<u16>()
            .context("ORDER_GRPC_PORT must be a valid u16 integer")?;

        let order_metric_port = std::env::var("ORDER_METRIC_PORT")
            .context("Missing environment variable: ORDER_METRIC_PORT")?
            .parse::<u16>()
            .context("ORDER_METRIC_PORT must be a valid u16 integer")?;

        let missing_product_policy = match std::env::var("MISSING_PRODUCT_POLICY") {
            Ok(value) => value
                .parse::<MissingProductPolicy>()
                .map_err(|e| anyhow!(e))
                .context("Invalid MISSING_PRODUCT_POLICY")?,
            Err(_) => MissingProductPolicy::default(),
        };

        let otel_endpoint = std::env::var("OTEL_ENDPOINT")
            .unwrap_or_else(|_| "http://otel-collector:4317".to_string());

        let is_dev = std::env::var("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let enable_file_log = std::env::var("ENABLE_FILE_LOG")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            run_migrations,
            order: ServiceConfig {
                grpc_port: order_grpc_port,
                metric_port: order_metric_port,
            },
            kafka_broker,
            db_max_conn,
            db_min_conn,
            missing_product_policy,
            otel_endpoint,
            is_dev,
            enable_file_log,
        })
    }
}
