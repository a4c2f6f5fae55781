//! Payment-intent and ledger DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::persistence::models::PaymentRecord;

/// Request body for `POST /create-payment-intent`.
#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    /// Rent amount in major currency units.
    #[serde(default)]
    pub rent: Option<i64>,
}

/// Response body for `POST /create-payment-intent`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIntentResponse {
    /// Client-side completion secret issued by the gateway.
    pub client_secret: String,
}

/// Request body for `POST /payments`.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    /// Paying user's email.
    #[serde(default)]
    pub payer_email: Option<String>,
    /// Amount paid, in minor units.
    #[serde(default)]
    pub amount: Option<i64>,
}

/// A ledger entry as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentDto {
    /// Row ID.
    pub id: i64,
    /// Paying user's email.
    pub payer_email: String,
    /// Amount paid, in minor units.
    pub amount: i64,
    /// Server-side payment timestamp.
    pub paid_at: DateTime<Utc>,
}

impl From<PaymentRecord> for PaymentDto {
    fn from(record: PaymentRecord) -> Self {
        Self {
            id: record.id,
            payer_email: record.payer_email,
            amount: record.amount,
            paid_at: record.paid_at,
        }
    }
}
