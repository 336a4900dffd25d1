// carquote
// Copyright 2026 The carquote Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Business logic for the service.

use crate::db::{BrandRepository, QuoteRepository};
use carquote_core::db::DbError;
use std::sync::Arc;

mod premium;
mod quote;
#[cfg(test)]
pub(crate) mod testutils;

pub use premium::{MINIMUM_DRIVER_AGE, MINIMUM_PURCHASE_PRICE};

/// Business logic errors.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum QuoteError {
    /// The driver is younger than the minimum age accepted for any car.
    #[error("Driver is too young to be insured")]
    DriverTooYoung,

    /// The car is too cheap to be insured.
    #[error("Purchase price is too low to be insured")]
    PurchasePriceTooLow,

    /// The requested brand does not exist.
    #[error("Unknown car brand")]
    UnknownBrand,

    /// The driver is too young for the requested brand.
    #[error("Risk is too high for this driver and brand")]
    RiskTooHigh,

    /// The requested quote does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The storage layer failed to serve a request.
    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl QuoteError {
    /// Returns true if this error is the rejection of a request by one of the quote rules.
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            QuoteError::DriverTooYoung
                | QuoteError::PurchasePriceTooLow
                | QuoteError::UnknownBrand
                | QuoteError::RiskTooHigh
        )
    }
}

impl From<DbError> for QuoteError {
    fn from(e: DbError) -> Self {
        QuoteError::StorageFailure(e.to_string())
    }
}

/// Result type for this module.
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Business logic.
///
/// The public operations exposed by the driver consume it to make it clear that each call is a
/// self-contained unit of work.  Clone the driver to issue more than one call.
#[derive(Clone)]
pub struct Driver {
    /// Catalog of brands to price quotes against.
    brands: Arc<dyn BrandRepository + Send + Sync>,

    /// Storage for the quotes that pass all rules.
    quotes: Arc<dyn QuoteRepository + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub fn new(
        brands: Arc<dyn BrandRepository + Send + Sync>,
        quotes: Arc<dyn QuoteRepository + Send + Sync>,
    ) -> Self {
        Self { brands, quotes }
    }
}
