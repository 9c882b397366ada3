mod grpc;
mod repository;
mod service;

pub use self::grpc::{AppErrorGrpc, grpc_status_to_service_error};
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
