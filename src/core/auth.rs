//! API-key authorization
//!
//! Writes are guarded by a single shared secret sent in a request header
//! (`x-api-key` unless configured otherwise). Which operations need the key
//! is decided per operation by an [`AuthPolicy`]; reads are always public.

use crate::config::{AuthConfig, ServerConfig};
use crate::core::error::ApiError;
use axum::http::{HeaderMap, HeaderName, Method};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Default header carrying the API key
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Authorization policy for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPolicy {
    /// No key required
    Public,

    /// Request must carry the configured API key
    ApiKey,
}

/// Write operations that can be guarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Map an HTTP method to the operation it performs, `None` for reads
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::POST => Some(Operation::Create),
            Method::PUT => Some(Operation::Update),
            Method::DELETE => Some(Operation::Delete),
            _ => None,
        }
    }
}

/// Compare a provided key with the expected one in constant time
///
/// Absent and mismatched keys are both reported as [`ApiError::Unauthorized`].
pub fn check_api_key(provided: Option<&str>, expected: &str) -> Result<(), ApiError> {
    match provided {
        Some(key) if bool::from(key.as_bytes().ct_eq(expected.as_bytes())) => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}

/// Guard holding the secret, its header and the per-operation policies
#[derive(Debug, Clone)]
pub struct ApiKeyGuard {
    header: HeaderName,
    key: String,
    policies: AuthConfig,
}

impl ApiKeyGuard {
    pub fn new(header: HeaderName, key: impl Into<String>, policies: AuthConfig) -> Self {
        Self {
            header,
            key: key.into(),
            policies,
        }
    }

    /// Build the guard described by a server configuration
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let header = HeaderName::try_from(config.api_key_header.as_str())?;
        Ok(Self::new(header, config.api_key.clone(), config.auth.clone()))
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// Policy applying to an operation
    pub fn policy(&self, operation: Operation) -> AuthPolicy {
        match operation {
            Operation::Create => self.policies.create,
            Operation::Update => self.policies.update,
            Operation::Delete => self.policies.delete,
        }
    }

    /// Check request headers for an operation
    pub fn authorize(&self, operation: Operation, headers: &HeaderMap) -> Result<(), ApiError> {
        match self.policy(operation) {
            AuthPolicy::Public => Ok(()),
            AuthPolicy::ApiKey => {
                let provided = headers
                    .get(&self.header)
                    .and_then(|value| value.to_str().ok());
                check_api_key(provided, &self.key).inspect_err(|_| {
                    tracing::warn!(?operation, "rejected request with missing or invalid API key");
                })
            }
        }
    }
}
