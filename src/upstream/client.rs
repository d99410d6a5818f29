use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::upstream::{
    models::{ContextPayload, Pagination},
    AuthStrategy, AvatarApi, NoAuth,
};

pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProxyError::Internal(e.to_string()))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends one request and sorts the outcome into the proxy error taxonomy.
    async fn send(
        &self,
        auth: &dyn AuthStrategy,
        builder: RequestBuilder,
        fallback_message: &str,
    ) -> Result<Value, ProxyError> {
        let response = auth
            .apply(builder.header("Accept", "application/json"))
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    ProxyError::Internal(e.to_string())
                } else {
                    error!(auth = auth.name(), "Upstream request failed: {}", e);
                    ProxyError::UpstreamUnreachable(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProxyError::UpstreamUnreachable(e.to_string()))?;

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            error!(%status, "Upstream returned a non-JSON body: {}", e);
            ProxyError::UpstreamBadResponse(e.to_string())
        })?;

        if !status.is_success() {
            let message = rejection_message(&json).unwrap_or(fallback_message).to_string();
            return Err(ProxyError::UpstreamRejected {
                status: status.as_u16(),
                message,
                details: json,
            });
        }

        Ok(json)
    }
}

fn rejection_message(body: &Value) -> Option<&str> {
    body.pointer("/data/message")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
}

/// Strips the upstream `{ "data": ... }` envelope when there is one.
pub fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => data,
            None => Value::Object(map),
        },
        other => other,
    }
}

#[async_trait]
impl AvatarApi for UpstreamClient {
    async fn create_context(
        &self,
        auth: &dyn AuthStrategy,
        payload: &ContextPayload,
    ) -> Result<Value, ProxyError> {
        info!(auth = auth.name(), name = %payload.name, "Creating upstream context");

        let builder = self
            .client
            .post(format!("{}/v1/contexts", self.base_url))
            .json(payload);

        let body = self.send(auth, builder, "Failed to create context").await?;
        Ok(unwrap_data(body))
    }

    async fn list_contexts(
        &self,
        auth: &dyn AuthStrategy,
        pagination: &Pagination,
    ) -> Result<Value, ProxyError> {
        info!(page = %pagination.page, page_size = %pagination.page_size, "Listing upstream contexts");

        let builder = self
            .client
            .get(format!("{}/v1/contexts", self.base_url))
            .query(&[
                ("page", pagination.page.as_str()),
                ("page_size", pagination.page_size.as_str()),
            ]);

        let body = self.send(auth, builder, "Failed to list contexts").await?;
        Ok(unwrap_data(body))
    }

    async fn list_public_avatars(&self) -> Result<Value, ProxyError> {
        info!("Listing public avatars");

        let builder = self.client.get(format!("{}/v1/avatars/public", self.base_url));

        let body = self.send(&NoAuth, builder, "Failed to fetch avatars").await?;
        Ok(unwrap_data(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwrap_data_prefers_envelope() {
        assert_eq!(unwrap_data(json!({ "data": { "id": "c1" } })), json!({ "id": "c1" }));
        assert_eq!(unwrap_data(json!({ "id": "c1" })), json!({ "id": "c1" }));
        assert_eq!(unwrap_data(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn rejection_message_lookup_order() {
        let nested = json!({ "data": { "message": "inner" }, "message": "outer" });
        assert_eq!(rejection_message(&nested), Some("inner"));
        assert_eq!(rejection_message(&json!({ "message": "outer" })), Some("outer"));
        assert_eq!(rejection_message(&json!({ "code": 7 })), None);
    }
}
