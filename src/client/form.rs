use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::client::{ClientError, ProxyClient};

pub const LINK_URL_REQUIRED: &str = "All links must have a URL before submitting.";
pub const NAME_PROMPT_REQUIRED: &str = "Name and Prompt are required.";

/// Stable key of a link row, local to one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct LinkRow {
    pub id: RowId,
    pub url: String,
    pub faq: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LinkDraft {
    pub url: String,
    pub faq: Option<String>,
    pub id: Option<String>,
}

/// The JSON body the form posts to `/api/context`.
#[derive(Debug, Serialize)]
pub struct NewContext {
    pub name: String,
    pub prompt: String,
    pub opening_text: Option<String>,
    pub links: Option<Vec<LinkDraft>>,
}

#[derive(Debug, Default)]
pub struct ContextForm {
    pub name: String,
    pub prompt: String,
    pub opening_text: String,
    links: Vec<LinkRow>,
    next_row: u64,
}

impl ContextForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn links(&self) -> &[LinkRow] {
        &self.links
    }

    /// Appends an empty row and returns its key. Keys are never reused.
    pub fn add_link(&mut self) -> RowId {
        let id = RowId(self.next_row);
        self.next_row += 1;
        self.links.push(LinkRow {
            id,
            url: String::new(),
            faq: None,
        });
        id
    }

    pub fn remove_link(&mut self, id: RowId) -> bool {
        let before = self.links.len();
        self.links.retain(|row| row.id != id);
        self.links.len() != before
    }

    pub fn update_url(&mut self, id: RowId, url: impl Into<String>) -> bool {
        match self.row_mut(id) {
            Some(row) => {
                row.url = url.into();
                true
            }
            None => false,
        }
    }

    /// An empty FAQ clears the field.
    pub fn update_faq(&mut self, id: RowId, faq: impl Into<String>) -> bool {
        let faq = faq.into();
        match self.row_mut(id) {
            Some(row) => {
                row.faq = if faq.is_empty() { None } else { Some(faq) };
                true
            }
            None => false,
        }
    }

    fn row_mut(&mut self, id: RowId) -> Option<&mut LinkRow> {
        self.links.iter_mut().find(|row| row.id == id)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.name.trim().is_empty() || self.prompt.trim().is_empty() {
            return Err(ClientError::Validation(NAME_PROMPT_REQUIRED.to_string()));
        }
        if self.links.iter().any(|row| row.url.trim().is_empty()) {
            return Err(ClientError::Validation(LINK_URL_REQUIRED.to_string()));
        }
        Ok(())
    }

    /// Row keys stay local; upstream link ids are assigned upstream.
    pub fn to_request(&self) -> NewContext {
        let links: Vec<LinkDraft> = self
            .links
            .iter()
            .map(|row| LinkDraft {
                url: row.url.trim().to_string(),
                faq: row.faq.clone(),
                id: None,
            })
            .collect();

        NewContext {
            name: self.name.clone(),
            prompt: self.prompt.clone(),
            opening_text: if self.opening_text.is_empty() {
                None
            } else {
                Some(self.opening_text.clone())
            },
            links: if links.is_empty() { None } else { Some(links) },
        }
    }
}

/// A form plus what the user last saw: the created context or an error line.
#[derive(Debug, Default)]
pub struct FormState {
    pub form: ContextForm,
    pub last_result: Option<Value>,
    pub error: Option<String>,
}

impl FormState {
    pub fn new(form: ContextForm) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    /// Validates, then posts. Failures land in `error` and are not propagated.
    /// Returns whether a context was created.
    pub async fn submit(&mut self, client: &ProxyClient) -> bool {
        if let Err(e) = self.form.validate() {
            self.error = Some(e.to_string());
            return false;
        }

        match client.create_context(&self.form.to_request()).await {
            Ok(context) => {
                self.last_result = Some(context);
                self.error = None;
                true
            }
            Err(e) => {
                warn!("Context submission failed: {}", e);
                self.error = Some(match e {
                    ClientError::Api { message, .. } => message,
                    other => other.to_string(),
                });
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContextForm {
        let mut form = ContextForm::new();
        form.name = "Support".into();
        form.prompt = "Answer billing questions".into();
        form
    }

    #[test]
    fn row_ids_are_monotonic_and_not_reused() {
        let mut form = filled();
        let a = form.add_link();
        let b = form.add_link();
        assert!(form.remove_link(a));
        let c = form.add_link();
        assert!(a < b && b < c);
        assert_eq!(form.links().iter().map(|r| r.id).collect::<Vec<_>>(), vec![b, c]);
        assert!(!form.remove_link(a));
    }

    #[test]
    fn blank_link_blocks_validation() {
        let mut form = filled();
        let row = form.add_link();
        form.update_url(row, "   ");
        assert!(matches!(
            form.validate(),
            Err(ClientError::Validation(message)) if message == LINK_URL_REQUIRED
        ));

        form.update_url(row, "https://docs.example");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn empty_faq_clears_field() {
        let mut form = filled();
        let row = form.add_link();
        form.update_faq(row, "How?");
        assert_eq!(form.links()[0].faq.as_deref(), Some("How?"));
        form.update_faq(row, "");
        assert!(form.links()[0].faq.is_none());
    }

    #[test]
    fn request_omits_empty_optionals() {
        let req = filled().to_request();
        assert!(req.opening_text.is_none());
        assert!(req.links.is_none());
    }

    #[test]
    fn missing_name_is_reported_first() {
        let mut form = ContextForm::new();
        form.add_link();
        assert!(matches!(
            form.validate(),
            Err(ClientError::Validation(message)) if message == NAME_PROMPT_REQUIRED
        ));
    }
}
