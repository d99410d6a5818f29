use reqwest::RequestBuilder;

/// How an outbound upstream request authenticates itself.
pub trait AuthStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder;
}

/// Server-side API key sent as `X-API-KEY`.
pub struct ApiKeyAuth {
    key: String,
}

impl ApiKeyAuth {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl AuthStrategy for ApiKeyAuth {
    fn name(&self) -> &'static str {
        "api_key"
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("X-API-KEY", &self.key)
    }
}

/// Caller-supplied session token sent as `Authorization: Bearer`.
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AuthStrategy for BearerAuth {
    fn name(&self) -> &'static str {
        "bearer"
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.token)
    }
}

pub struct NoAuth;

impl AuthStrategy for NoAuth {
    fn name(&self) -> &'static str {
        "none"
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;

    fn headers_for(auth: &dyn AuthStrategy) -> reqwest::header::HeaderMap {
        let request = auth
            .apply(Client::new().get("http://localhost/v1/contexts"))
            .build()
            .unwrap();
        request.headers().clone()
    }

    #[test]
    fn api_key_sets_custom_header() {
        let headers = headers_for(&ApiKeyAuth::new("k-123"));
        assert_eq!(headers["X-API-KEY"], "k-123");
        assert!(headers.get("Authorization").is_none());
    }

    #[test]
    fn bearer_sets_authorization() {
        let headers = headers_for(&BearerAuth::new("tok"));
        assert_eq!(headers["Authorization"], "Bearer tok");
        assert!(headers.get("X-API-KEY").is_none());
    }

    #[test]
    fn no_auth_leaves_request_untouched() {
        assert!(headers_for(&NoAuth).is_empty());
    }
}
