use crate::errors::repository::RepositoryError;
use rdkafka::error::KafkaError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Authentication failed: {0}")]
    Unauthenticated(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    #[error("Persistence failure: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Kafka error: {0}")]
    Kafka(String),
}

impl From<KafkaError> for ServiceError {
    fn from(error: KafkaError) -> Self {
        ServiceError::Kafka(error.to_string())
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors.to_string().lines().map(str::to_owned).collect())
    }
}
