use shared::errors::ServiceError;
use std::fmt;
use tonic::{
    Request,
    metadata::{Ascii, MetadataMap, MetadataValue},
};

pub const CALLER_ID_METADATA_KEY: &str = "caller-id";

/// Account identity bound to one inbound request by the upstream
/// authentication layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(String);

impl CallerIdentity {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self(account_id.into())
    }

    /// Reads the identity from `caller-id`. Absent, empty or non-ASCII values
    /// are rejected as unauthenticated.
    pub fn from_metadata(metadata: &MetadataMap) -> Result<Self, ServiceError> {
        let value = metadata.get(CALLER_ID_METADATA_KEY).ok_or_else(|| {
            ServiceError::Unauthenticated("missing caller identity".to_string())
        })?;

        let account_id = value.to_str().map_err(|_| {
            ServiceError::Unauthenticated("caller identity is not valid ASCII".to_string())
        })?;

        let account_id = account_id.trim();
        if account_id.is_empty() {
            return Err(ServiceError::Unauthenticated(
                "empty caller identity".to_string(),
            ));
        }

        Ok(Self(account_id.to_string()))
    }

    pub fn account_id(&self) -> &str {
        &self.0
    }

    /// Self-service only: the caller may act on its own account and nothing else.
    pub fn ensure_self(&self, account_id: &str) -> Result<(), ServiceError> {
        if self.0 != account_id {
            return Err(ServiceError::Forbidden(format!(
                "caller {} may not act on account {account_id}",
                self.0
            )));
        }

        Ok(())
    }

    pub fn attach<T>(&self, request: &mut Request<T>) -> Result<(), ServiceError> {
        let value = self.0.parse::<MetadataValue<Ascii>>().map_err(|_| {
            ServiceError::Unauthenticated("caller identity is not valid ASCII".to_string())
        })?;

        request
            .metadata_mut()
            .insert(CALLER_ID_METADATA_KEY, value);

        Ok(())
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
