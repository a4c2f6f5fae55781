//! Billing bridge: payment-intent creation against the external
//! payment gateway.
//!
//! The gateway is a seam ([`PaymentGateway`]) so handlers can be tested
//! without network access. The HTTP implementation speaks the common
//! processor dialect: form-encoded intent creation authorized by a
//! bearer secret, answered with a `client_secret` the front-end
//! completes the payment with.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A created payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Client-side completion secret.
    pub client_secret: String,
}

/// External payment-processor seam.
#[async_trait]
pub trait PaymentGateway: Send + Sync + fmt::Debug {
    /// Creates a payment intent for `amount_minor` (minor currency
    /// units).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Upstream`] when the gateway rejects the
    /// request or cannot be reached.
    async fn create_intent(&self, amount_minor: i64) -> Result<PaymentIntent, ApiError>;
}

/// HTTP payment gateway client.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    url: String,
    secret: String,
}

impl HttpPaymentGateway {
    /// Creates a client for the gateway at `url`, authorized by
    /// `secret`.
    #[must_use]
    pub fn new(url: String, secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            secret,
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_intent(&self, amount_minor: i64) -> Result<PaymentIntent, ApiError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.secret)
            .form(&[
                ("amount", amount_minor.to_string()),
                ("currency", "usd".to_string()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await
            .map_err(|err| ApiError::Upstream(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "payment gateway returned {}",
                response.status()
            )));
        }

        response
            .json::<PaymentIntent>()
            .await
            .map_err(|err| ApiError::Upstream(err.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn intent_deserializes_from_the_gateway_shape() {
        let parsed: Result<PaymentIntent, _> =
            serde_json::from_str(r#"{"client_secret":"pi_123_secret_456","id":"pi_123"}"#);
        let Ok(intent) = parsed else {
            panic!("expected deserialization to succeed");
        };
        assert_eq!(intent.client_secret, "pi_123_secret_456");
    }

    #[test]
    fn missing_client_secret_is_an_error() {
        let parsed: Result<PaymentIntent, _> = serde_json::from_str(r#"{"id":"pi_123"}"#);
        assert!(parsed.is_err());
    }
}
