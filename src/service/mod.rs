//! Service layer: business logic orchestration.
//!
//! [`AgreementLifecycle`] owns the agreement/role state machine;
//! [`billing`] bridges to the external payment gateway.

pub mod agreement_lifecycle;
pub mod billing;

pub use agreement_lifecycle::AgreementLifecycle;
pub use billing::{HttpPaymentGateway, PaymentGateway, PaymentIntent};
