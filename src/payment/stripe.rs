use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info};

use crate::config::PaymentConfig;
use crate::payment::{
    models::{CheckoutSession, LineItem},
    PaymentError, PaymentProvider,
};

/// Stripe-compatible hosted checkout (`POST /v1/checkout/sessions`, form encoded).
pub struct StripeCheckout {
    client: Client,
    api_base: String,
    secret_key: String,
    currency: String,
}

impl StripeCheckout {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
            currency: config.currency.clone(),
        }
    }

    fn form_params(&self, item: &LineItem, success_url: &str, cancel_url: &str) -> Vec<(String, String)> {
        let mut params = vec![
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
        ];

        match item {
            LineItem::Price(price_id) => {
                params.push(("line_items[0][price]".to_string(), price_id.clone()));
            }
            LineItem::Inline {
                product_name,
                unit_amount,
            } => {
                params.push((
                    "line_items[0][price_data][currency]".to_string(),
                    self.currency.clone(),
                ));
                params.push((
                    "line_items[0][price_data][product_data][name]".to_string(),
                    product_name.clone(),
                ));
                params.push((
                    "line_items[0][price_data][unit_amount]".to_string(),
                    unit_amount.to_string(),
                ));
            }
        }

        params
    }
}

#[async_trait]
impl PaymentProvider for StripeCheckout {
    fn name(&self) -> &str {
        "stripe"
    }

    async fn create_checkout_session(
        &self,
        item: &LineItem,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, PaymentError> {
        info!(?item, "Creating checkout session");

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&self.form_params(item, success_url, cancel_url))
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let json: Value = response
            .json()
            .await
            .map_err(|e| {
                error!(%status, "Checkout response is not JSON: {}", e);
                PaymentError::Decode(e.to_string())
            })?;

        if !status.is_success() {
            let message = json
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| format!("Stripe Error {}", status));
            error!(%status, "Checkout session rejected: {}", message);
            return Err(PaymentError::Provider(message));
        }

        serde_json::from_value(json).map_err(|e| PaymentError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> StripeCheckout {
        StripeCheckout::new(&PaymentConfig {
            api_base: "https://api.stripe.com/".into(),
            secret_key: "sk_test".into(),
            currency: "eur".into(),
        })
    }

    fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn inline_item_carries_currency_and_amount() {
        let item = LineItem::Inline {
            product_name: "Pro Credits Package".into(),
            unit_amount: 12_000,
        };
        let params = provider().form_params(&item, "https://a/success", "https://a/pricing");
        assert_eq!(lookup(&params, "mode"), Some("payment"));
        assert_eq!(lookup(&params, "line_items[0][quantity]"), Some("1"));
        assert_eq!(lookup(&params, "line_items[0][price_data][currency]"), Some("eur"));
        assert_eq!(lookup(&params, "line_items[0][price_data][unit_amount]"), Some("12000"));
        assert!(lookup(&params, "line_items[0][price]").is_none());
    }

    #[test]
    fn price_item_references_price_only() {
        let params = provider().form_params(&LineItem::Price("price_1".into()), "s", "c");
        assert_eq!(lookup(&params, "line_items[0][price]"), Some("price_1"));
        assert!(lookup(&params, "line_items[0][price_data][currency]").is_none());
        assert_eq!(lookup(&params, "success_url"), Some("s"));
        assert_eq!(lookup(&params, "cancel_url"), Some("c"));
    }
}
