//! Client side of the proxy: what the dashboard forms and the CLI talk through.

pub mod avatars;
pub mod form;

pub use avatars::AvatarFeed;
pub use form::{ContextForm, FormState, RowId};

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::payment::models::CheckoutRequest;
use crate::upstream::models::{Avatar, Pagination};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),
    #[error("Network Error: {0}")]
    Network(String),
    #[error("API Error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Request cancelled")]
    Cancelled,
}

/// Talks to a running proxy over its `/api` surface.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn call(&self, builder: RequestBuilder) -> Result<Value, ClientError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let json: Value = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if !status.is_success() {
            let message = json
                .get("error")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| json.to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(json)
    }

    fn field(mut body: Value, key: &str) -> Result<Value, ClientError> {
        match body.get_mut(key).map(Value::take) {
            Some(value) => Ok(value),
            None => Err(ClientError::Decode(format!("missing `{}` in {}", key, body))),
        }
    }

    pub async fn create_context<T: Serialize + ?Sized>(&self, body: &T) -> Result<Value, ClientError> {
        let json = self.call(self.client.post(self.url("/context")).json(body)).await?;
        Self::field(json, "context")
    }

    pub async fn list_contexts(&self, pagination: &Pagination) -> Result<Value, ClientError> {
        let builder = self.client.get(self.url("/context")).query(&[
            ("page", pagination.page.as_str()),
            ("page_size", pagination.page_size.as_str()),
        ]);
        let json = self.call(builder).await?;
        Self::field(json, "contexts")
    }

    pub async fn list_avatars(&self) -> Result<Vec<Avatar>, ClientError> {
        let json = self.call(self.client.get(self.url("/avatars"))).await?;
        let avatars = Self::field(json, "avatars")?;
        serde_json::from_value(avatars).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Returns the hosted checkout URL to send the user to.
    pub async fn checkout(&self, req: &CheckoutRequest) -> Result<String, ClientError> {
        let json = self.call(self.client.post(self.url("/checkout")).json(req)).await?;
        match Self::field(json, "url")? {
            Value::String(url) => Ok(url),
            other => Err(ClientError::Decode(format!("checkout url is not a string: {}", other))),
        }
    }
}
