use serde::{Deserialize, Serialize};

use crate::payment::{tiers::find_tier, PaymentError};

/// Body accepted by `POST /api/checkout`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
}

/// What is being bought. Always quantity one.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItem {
    /// A price already registered with the provider.
    Price(String),
    /// An inline price built from a tier.
    Inline { product_name: String, unit_amount: u64 },
}

impl CheckoutRequest {
    pub fn line_item(&self) -> Result<LineItem, PaymentError> {
        if let Some(price_id) = self.price_id.as_deref().map(str::trim) {
            if !price_id.is_empty() {
                return Ok(LineItem::Price(price_id.to_string()));
            }
        }

        let tier = self
            .tier_name
            .as_deref()
            .and_then(find_tier)
            .filter(|tier| tier.is_payable())
            .ok_or(PaymentError::MissingPrice)?;

        Ok(LineItem::Inline {
            product_name: format!("{} Credits Package", tier.name),
            unit_amount: tier.unit_amount.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
}
