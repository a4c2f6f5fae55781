//! Data Transfer Objects for REST request/response serialization.
//!
//! Request bodies keep their fields optional at the serde layer; the
//! handlers and the domain validators turn missing fields into
//! structured validation errors that name the field.

pub mod agreement_dto;
pub mod announcement_dto;
pub mod apartment_dto;
pub mod billing_dto;
pub mod common_dto;
pub mod coupon_dto;
pub mod user_dto;

pub use agreement_dto::*;
pub use announcement_dto::*;
pub use apartment_dto::*;
pub use billing_dto::*;
pub use common_dto::*;
pub use coupon_dto::*;
pub use user_dto::*;
