pub mod auth;
pub mod client;
pub mod models;

pub use auth::{ApiKeyAuth, AuthStrategy, BearerAuth, NoAuth};
pub use client::UpstreamClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProxyError;
use models::{ContextPayload, Pagination};

/// The slice of the upstream avatar API this service proxies.
#[async_trait]
pub trait AvatarApi: Send + Sync {
    /// Creates a context and returns the upstream resource, unwrapped from its `data` envelope.
    async fn create_context(
        &self,
        auth: &dyn AuthStrategy,
        payload: &ContextPayload,
    ) -> Result<Value, ProxyError>;

    /// Returns the upstream paginated payload as-is (minus the `data` envelope).
    async fn list_contexts(
        &self,
        auth: &dyn AuthStrategy,
        pagination: &Pagination,
    ) -> Result<Value, ProxyError>;

    async fn list_public_avatars(&self) -> Result<Value, ProxyError>;
}
