use serde::{Deserialize, Deserializer, Serialize};

/// A reference link attached to a context, as sent upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub faq: Option<String>,
    pub id: Option<String>,
}

/// Body of `POST /v1/contexts`.
#[derive(Debug, Clone, Serialize)]
pub struct ContextPayload {
    pub name: String,
    pub prompt: String,
    pub opening_text: Option<String>,
    pub links: Option<Vec<Link>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<String>,
}

/// Page parameters, forwarded to upstream without interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub page: String,
    pub page_size: String,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: "1".to_string(),
            page_size: "20".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_expired: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Upstream sends `null` for fields it has not filled in yet.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
