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

//! High-level data types.

use carquote_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Age of a driver in whole years.
///
/// Any value is representable, including negative ones: it is up to the quote rules to decide
/// which ages are acceptable.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct DriverAge(i32);

impl DriverAge {
    /// Creates a new driver age.
    pub const fn new(age: i32) -> Self {
        Self(age)
    }

    /// Creates an age from a value read from storage, validating its range.
    pub fn from_i64(age: i64) -> ModelResult<Self> {
        match i32::try_from(age) {
            Ok(age) => Ok(Self(age)),
            Err(e) => Err(ModelError(format!("Driver age {} cannot be represented: {}", age, e))),
        }
    }

    /// Returns the age as an `i32`.
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

/// Identifier of a car brand.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct BrandId(i64);

impl BrandId {
    /// Creates a new brand identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

/// Identifier of a persisted quote.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct QuoteId(i64);

impl QuoteId {
    /// Creates a new quote identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

/// A car brand along with the pricing rules that apply to it.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub struct Brand {
    /// Unique identifier of the brand.
    id: BrandId,

    /// Display name of the brand.
    name: String,

    /// Youngest driver that can be insured for a car of this brand.
    minimum_driver_age: DriverAge,

    /// Premium charged per year for a car of this brand.
    yearly_premium: Decimal,
}

/// The persisted outcome of a successful premium calculation.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub struct Quote {
    /// Unique identifier of the quote, assigned by storage.
    id: QuoteId,

    /// Age of the driver the quote was computed for.
    driver_age: DriverAge,

    /// Premium charged per month.
    monthly_premium: Decimal,

    /// Premium charged per year.
    yearly_premium: Decimal,

    /// When the quote was persisted.
    created_on: OffsetDateTime,
}

/// The price of an insurance quote as returned to callers.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Premium {
    /// Identifier of the quote this premium belongs to.
    pub id: QuoteId,

    /// Premium charged per month.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_premium: Decimal,

    /// Premium charged per year.
    #[serde(with = "rust_decimal::serde::float")]
    pub yearly_premium: Decimal,
}

impl From<&Quote> for Premium {
    fn from(quote: &Quote) -> Self {
        Self {
            id: quote.id,
            monthly_premium: quote.monthly_premium,
            yearly_premium: quote.yearly_premium,
        }
    }
}

/// Computes the monthly premium for a `yearly` premium, rounded to whole currency units with ties
/// going up.
pub fn monthly_from_yearly(yearly: Decimal) -> Decimal {
    (yearly / Decimal::from(12)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
