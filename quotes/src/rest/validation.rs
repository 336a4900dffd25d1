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

//! Shape validation of quote requests.
//!
//! Fields are accepted as raw JSON values so that all problems in a request can be reported at
//! once instead of stopping at the first field that fails to deserialize.

use crate::model::{BrandId, DriverAge};
use carquote_core::rest::FieldError;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::str::FromStr;

/// Raw payload of a request to compute a premium.
///
/// Only JSON objects are accepted: deserializing from anything else, including a positional array,
/// fails before validation runs.
#[derive(Debug, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub(crate) struct QuoteRequest {
    /// Age of the driver in years.
    pub(crate) driver_age: Option<Value>,

    /// Identifier of the brand of the car.
    pub(crate) brand_id: Option<Value>,

    /// Price paid for the car.
    pub(crate) purchase_price: Option<Value>,
}

impl From<Map<String, Value>> for QuoteRequest {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            driver_age: fields.remove("driverAge"),
            brand_id: fields.remove("brandId"),
            purchase_price: fields.remove("purchasePrice"),
        }
    }
}

/// A quote request whose fields have all been checked to have the right types.
#[derive(Debug, PartialEq)]
pub(crate) struct ValidatedQuote {
    /// Age of the driver in years.
    pub(crate) driver_age: DriverAge,

    /// Identifier of the brand of the car.
    pub(crate) brand_id: BrandId,

    /// Price paid for the car.
    pub(crate) purchase_price: Decimal,
}

/// Extracts the number held in `field`, recording an error in `errors` if there is none.
fn require_number<'a>(
    name: &str,
    field: &'a Option<Value>,
    errors: &mut Vec<FieldError>,
) -> Option<&'a Number> {
    match field {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(name, format!("{} is required", name)));
            None
        }
        Some(Value::Number(n)) => Some(n),
        Some(_) => {
            errors.push(FieldError::new(name, format!("{} must be a number", name)));
            None
        }
    }
}

/// Converts `n` to an integer of type `T`, recording an error in `errors` if it is not one or
/// if it does not fit.
fn to_integer<T: TryFrom<i64>>(
    name: &str,
    n: &Number,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    if n.is_f64() {
        errors.push(FieldError::new(name, format!("{} must be an integer", name)));
        return None;
    }
    match n.as_i64().and_then(|i| T::try_from(i).ok()) {
        Some(value) => Some(value),
        None => {
            errors.push(FieldError::new(name, format!("{} is out of range", name)));
            None
        }
    }
}

/// Converts `n` to a decimal, recording an error in `errors` if it cannot be represented.
fn to_decimal(name: &str, n: &Number, errors: &mut Vec<FieldError>) -> Option<Decimal> {
    let raw = n.to_string();
    match Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(FieldError::new(name, format!("{} is out of range", name)));
            None
        }
    }
}

/// Checks that all fields in `request` are present and of the right type.
///
/// Returns one error per invalid field, in the same order as the fields appear in the request.
pub(crate) fn validate(request: &QuoteRequest) -> Result<ValidatedQuote, Vec<FieldError>> {
    let mut errors = vec![];

    let driver_age = require_number("driverAge", &request.driver_age, &mut errors)
        .and_then(|n| to_integer::<i32>("driverAge", n, &mut errors));
    let brand_id = require_number("brandId", &request.brand_id, &mut errors)
        .and_then(|n| to_integer::<i64>("brandId", n, &mut errors));
    let purchase_price = require_number("purchasePrice", &request.purchase_price, &mut errors)
        .and_then(|n| to_decimal("purchasePrice", n, &mut errors));

    match (driver_age, brand_id, purchase_price) {
        (Some(driver_age), Some(brand_id), Some(purchase_price)) => Ok(ValidatedQuote {
            driver_age: DriverAge::new(driver_age),
            brand_id: BrandId::new(brand_id),
            purchase_price,
        }),
        _ => Err(errors),
    }
}
