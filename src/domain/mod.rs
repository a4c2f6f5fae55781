//! Domain layer: roles, agreement lifecycle types, coupon verdicts,
//! and catalog pagination arithmetic.
//!
//! Everything here is storage-agnostic and synchronous; the service and
//! persistence layers compose these types with I/O.

pub mod agreement;
pub mod coupon;
pub mod pagination;
pub mod role;

pub use agreement::{AgreementStatus, ApartmentRef, NewAgreement};
pub use coupon::CouponVerdict;
pub use role::Role;
