use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProxyError;
use crate::upstream::models::{ContextPayload, Link, Pagination};

/// Body shared by every create-context route. Which fields are required depends on the route.
#[derive(Debug, Default, Deserialize)]
pub struct CreateContextRequest {
    pub name: Option<String>,
    pub prompt: Option<String>,
    pub opening_text: Option<String>,
    /// Anything that is not an array is dropped.
    #[serde(default)]
    pub links: Option<Value>,
    pub avatar_id: Option<String>,
    pub session_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LinkInput {
    url: Option<String>,
    faq: Option<String>,
    id: Option<String>,
}

/// Returns the value untouched when it is present and non-blank.
pub fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ProxyError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ProxyError::validation(format!("{} is required", field))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn normalize_links(links: Option<Value>) -> Result<Option<Vec<Link>>, ProxyError> {
    let items = match links {
        Some(Value::Array(items)) => items,
        _ => return Ok(None),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let input: LinkInput = serde_json::from_value(item).map_err(|_| {
                ProxyError::validation(format!("links[{}] must be an object with a url", i))
            })?;
            let url = required(input.url.as_deref(), &format!("links[{}].url", i))?.to_string();
            Ok(Link {
                url,
                faq: non_blank(input.faq),
                id: non_blank(input.id),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

impl CreateContextRequest {
    /// Validates the common fields and builds the upstream body.
    pub fn into_payload(self, avatar_id: Option<String>) -> Result<ContextPayload, ProxyError> {
        let name = required(self.name.as_deref(), "name")?.to_string();
        let prompt = required(self.prompt.as_deref(), "prompt")?.to_string();
        let links = normalize_links(self.links)?;

        Ok(ContextPayload {
            name,
            prompt,
            opening_text: non_blank(self.opening_text),
            links,
            avatar_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ContextListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl From<ContextListQuery> for Pagination {
    fn from(query: ContextListQuery) -> Self {
        let defaults = Pagination::default();
        Self {
            page: non_blank(query.page).unwrap_or(defaults.page),
            page_size: non_blank(query.page_size).unwrap_or(defaults.page_size),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContextCreated {
    pub success: bool,
    pub context: Value,
}

#[derive(Debug, Serialize)]
pub struct ContextList {
    pub success: bool,
    pub contexts: Value,
}

#[derive(Debug, Serialize)]
pub struct AvatarList {
    pub success: bool,
    pub avatars: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutRedirect {
    pub url: String,
}
