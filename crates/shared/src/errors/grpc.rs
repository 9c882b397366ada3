use crate::errors::service::ServiceError;
use thiserror::Error;
use tonic::Status;

#[derive(Debug, Error)]
pub enum AppErrorGrpc {
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

impl From<AppErrorGrpc> for Status {
    fn from(err: AppErrorGrpc) -> Self {
        match err {
            AppErrorGrpc::Service(service_err) => match service_err {
                ServiceError::Unauthenticated(msg) => Status::unauthenticated(msg),

                ServiceError::Forbidden(msg) => Status::permission_denied(msg),

                ServiceError::AccountNotFound(id) => {
                    Status::not_found(format!("Account not found: {id}"))
                }

                ServiceError::Validation(errors) => {
                    Status::invalid_argument(format!("Validation failed: {errors:?}"))
                }

                ServiceError::Upstream(msg) => Status::unavailable(msg),

                ServiceError::Repo(_) => Status::internal("Database error"),

                ServiceError::Kafka(err) => Status::unavailable(format!("Kafka error: {err}")),
            },
        }
    }
}

/// Classifies a status returned by a downstream service.
///
/// Anything that is not an identity or argument problem is treated as the
/// dependency being unavailable, including deadline expiry.
pub fn grpc_status_to_service_error(status: Status) -> ServiceError {
    match status.code() {
        tonic::Code::Unauthenticated => ServiceError::Unauthenticated(status.message().to_string()),

        tonic::Code::PermissionDenied => ServiceError::Forbidden(status.message().to_string()),

        tonic::Code::InvalidArgument => {
            ServiceError::Validation(vec![status.message().to_string()])
        }

        code => ServiceError::Upstream(format!("gRPC error: {code} - {}", status.message())),
    }
}
