use anyhow::{Context, Result};
use axum::Router;
use genproto::order::{
    order_command_service_server::OrderCommandServiceServer,
    order_query_service_server::OrderQueryServiceServer,
};
use order::{
    config::{myconfig::Config, server_config::ServerConfig},
    handler::order::{OrderCommandGrpcServiceImpl, OrderQueryGrpcServiceImpl},
    metrics::metrics_handler,
    shutdown::ShutdownSignal,
    state::AppState,
};
use shared::{
    config::ConnectionManager,
    utils::{Telemetry, init_logger},
};
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;
    let server_config = ServerConfig::from_config(&config)?;

    let telemetry = Telemetry::init("order-service", &config.otel_endpoint)
        .context("Failed to initialize telemetry")?;

    let _log_guard = init_logger(
        telemetry.logger_provider(),
        "order-service",
        config.is_dev,
        config.enable_file_log,
    )?;

    let state = setup(&config, &server_config)
        .await
        .context("Failed to setup application")?;

    let shutdown_signal = ShutdownSignal::new();

    let (grpc_handle, metrics_handle) =
        run_servers(&server_config, state.clone(), &shutdown_signal);

    let ctrl_c_signal = shutdown_signal.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("🛑 Shutdown signal received (Ctrl+C).");
                ctrl_c_signal.trigger();
            }
            Err(e) => {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        }
    });

    shutdown_signal.wait().await;

    shutdown(state, telemetry, grpc_handle, metrics_handle).await;

    Ok(())
}

async fn setup(config: &Config, server_config: &ServerConfig) -> Result<Arc<AppState>> {
    info!("Starting order service initialization...");

    let db_pool = ConnectionManager::new_pool(
        &server_config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if server_config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("failed to migration database")?;
        info!("✅ Database migrations applied");
    }

    let state = Arc::new(
        AppState::new(db_pool, config)
            .await
            .context("Failed to create AppState")?,
    );

    info!("✅ Application setup completed successfully.");
    Ok(state)
}

fn run_servers(
    server_config: &ServerConfig,
    state: Arc<AppState>,
    shutdown_signal: &ShutdownSignal,
) -> (JoinHandle<()>, JoinHandle<()>) {
    let grpc_addr = server_config.grpc_addr;
    let grpc_shutdown = shutdown_signal.clone();

    let order_query =
        OrderQueryGrpcServiceImpl::new(Arc::new(state.di_container.order_query.clone()));
    let order_command =
        OrderCommandGrpcServiceImpl::new(Arc::new(state.di_container.order_command.clone()));

    let grpc_handle = tokio::spawn(async move {
        loop {
            match start_grpc_server(
                order_command.clone(),
                order_query.clone(),
                grpc_addr,
                grpc_shutdown.clone(),
            )
            .await
            {
                Ok(()) => {
                    info!("gRPC server stopped gracefully.");
                    break;
                }
                Err(e) => {
                    error!("❌ gRPC server failed: {e}. Restarting in 5s...");
                    tokio::select! {
                        _ = grpc_shutdown.wait() => break,
                        _ = tokio::time::sleep(tokio::time::Duration::from_secs(5)) => {}
                    }
                }
            }
        }
    });

    let metrics_addr = server_config.metrics_addr;
    let metrics_shutdown = shutdown_signal.clone();

    let metrics_handle = tokio::spawn(async move {
        loop {
            info!("🔧 Starting metrics server on {metrics_addr}");
            match start_metrics_server(
                state.clone(),
                metrics_addr,
                metrics_shutdown.clone(),
            )
            .await
            {
                Ok(()) => {
                    info!("Metrics server stopped gracefully");
                    break;
                }
                Err(e) => {
                    error!("❌ Metrics server failed: {e}. Retrying in 3s...");
                    tokio::select! {
                        _ = metrics_shutdown.wait() => break,
                        _ = tokio::time::sleep(tokio::time::Duration::from_secs(3)) => {}
                    }
                }
            }
        }
    });

    (grpc_handle, metrics_handle)
}

async fn shutdown(
    state: Arc<AppState>,
    telemetry: Telemetry,
    grpc_handle: JoinHandle<()>,
    metrics_handle: JoinHandle<()>,
) {
    info!("🛑 Shutting down all servers...");

    let shutdown_timeout = tokio::time::Duration::from_secs(30);
    let shutdown_result = tokio::time::timeout(shutdown_timeout, async {
        tokio::join!(grpc_handle, metrics_handle)
    })
    .await;

    match shutdown_result {
        Ok((grpc_result, metrics_result)) => {
            if let Err(e) = grpc_result {
                error!("gRPC server task panicked: {}", e);
            }
            if let Err(e) = metrics_result {
                error!("Metrics server task panicked: {}", e);
            }
            info!("✅ All servers shutdown gracefully.");
        }
        Err(_) => {
            warn!("⚠️  Shutdown timeout reached, forcing exit.");
        }
    }

    state.pool.close().await;
    info!("🔌 Database pool closed");

    if let Err(e) = telemetry.shutdown() {
        error!("Failed to shutdown telemetry: {}", e);
    }

    info!("✅ Order Service shutdown complete.");
}

async fn start_grpc_server(
    order_command_handler: OrderCommandGrpcServiceImpl,
    order_query_handler: OrderQueryGrpcServiceImpl,
    addr: std::net::SocketAddr,
    shutdown_signal: ShutdownSignal,
) -> Result<()> {
    info!("Starting gRPC server on {addr}");

    let shutdown_future = async move {
        shutdown_signal.wait().await;
        info!("gRPC server received shutdown signal");
    };

    tonic::transport::Server::builder()
        .add_service(OrderCommandServiceServer::new(order_command_handler))
        .add_service(OrderQueryServiceServer::new(order_query_handler))
        .serve_with_shutdown(addr, shutdown_future)
        .await
        .context("gRPC server failed to start or serve")
}

async fn start_metrics_server(
    state: Arc<AppState>,
    addr: std::net::SocketAddr,
    shutdown_signal: ShutdownSignal,
) -> Result<()> {
    let app = Router::new()
        .route("/metrics", axum::routing::get(metrics_handler))
        .route("/health", axum::routing::get(health_check))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind metrics listener on {addr}"))?;

    let shutdown_future = async move {
        shutdown_signal.wait().await;
        info!("Metrics server received shutdown signal");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_future)
        .await
        .context("Metrics server failed to start or serve")
}

async fn health_check() -> &'static str {
    "OK"
}

pub async fn run_migrations(pool: &Pool<Postgres>) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    Ok(())
}
