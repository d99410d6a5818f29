pub mod models;
pub mod stripe;
pub mod tiers;

pub use stripe::StripeCheckout;

use async_trait::async_trait;
use thiserror::Error;

use models::{CheckoutSession, LineItem};

#[derive(Debug, Error)]
pub enum PaymentError {
    /// Neither a price id nor a payable tier was supplied.
    #[error("Missing price")]
    MissingPrice,
    /// The provider's own error message.
    #[error("{0}")]
    Provider(String),
    #[error("Unreadable provider response: {0}")]
    Decode(String),
    #[error("Network Error: {0}")]
    Network(String),
}

/// A hosted-checkout provider: one line item in, one redirect URL out.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn create_checkout_session(
        &self,
        item: &LineItem,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, PaymentError>;
}
