//! Agreement lifecycle types and submission validation.
//!
//! An agreement moves `Pending → Checked` exactly once. Both the accept
//! and the reject branch land on `Checked`; the stored status alone does
//! not record which branch was taken — only the correlated role change
//! does.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Agreement status. One-way: `Pending → Checked`, no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgreementStatus {
    /// Submitted, awaiting an admin decision.
    Pending,
    /// Decided (accepted or rejected). Terminal.
    Checked,
}

impl AgreementStatus {
    /// Returns the canonical lowercase string used in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Checked => "checked",
        }
    }
}

impl fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgreementStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "checked" => Ok(Self::Checked),
            other => Err(ApiError::Internal(format!(
                "unknown agreement status in storage: {other}"
            ))),
        }
    }
}

/// Location of one apartment within the estate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApartmentRef {
    /// Building block name.
    pub block: String,
    /// Floor number.
    pub floor: i32,
    /// Apartment number within the floor.
    pub apartment_no: i32,
}

/// A validated agreement submission, ready for insertion.
///
/// Built through [`NewAgreement::from_parts`], which is the single place
/// where the field-presence rules live.
#[derive(Debug, Clone)]
pub struct NewAgreement {
    /// Owning user, by email.
    pub user_email: String,
    /// Apartment the user is applying for.
    pub apartment: ApartmentRef,
    /// Monthly rent at submission time.
    pub rent: i64,
}

impl NewAgreement {
    /// Validates the optional request fields into a submission.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the first missing field.
    pub fn from_parts(
        user_email: Option<String>,
        block: Option<String>,
        floor: Option<i32>,
        apartment_no: Option<i32>,
        rent: Option<i64>,
    ) -> Result<Self, ApiError> {
        let user_email = require(user_email, "user_email")?;
        let block = require(block, "block")?;
        let floor = require(floor, "floor")?;
        let apartment_no = require(apartment_no, "apartment_no")?;
        let rent = require(rent, "rent")?;

        Ok(Self {
            user_email,
            apartment: ApartmentRef {
                block,
                floor,
                apartment_no,
            },
            rent,
        })
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::Validation(format!("missing field: {field}")))
}
