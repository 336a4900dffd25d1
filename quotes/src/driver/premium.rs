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

//! Evaluation of the rules that decide whether a quote can be issued.

use crate::driver::{Driver, QuoteError, QuoteResult};
use crate::model::*;
use log::{debug, info};
use rust_decimal::Decimal;

/// Youngest driver that can be insured, regardless of the car brand.
pub const MINIMUM_DRIVER_AGE: DriverAge = DriverAge::new(18);

/// Cheapest car that can be insured.
pub const MINIMUM_PURCHASE_PRICE: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

impl Driver {
    /// Computes the premium for a driver of `driver_age` buying a car of `brand_id` for
    /// `purchase_price` and persists the resulting quote.
    ///
    /// Rules are checked in order and the first one that fails determines the error.  Nothing is
    /// persisted unless all rules pass.
    pub async fn calculate_premium(
        self,
        driver_age: DriverAge,
        brand_id: BrandId,
        purchase_price: Decimal,
    ) -> QuoteResult<Premium> {
        if driver_age < MINIMUM_DRIVER_AGE {
            debug!("Rejecting quote: driver age {} is too young", driver_age.as_i32());
            return Err(QuoteError::DriverTooYoung);
        }

        if purchase_price < MINIMUM_PURCHASE_PRICE {
            debug!("Rejecting quote: purchase price {} is too low", purchase_price);
            return Err(QuoteError::PurchasePriceTooLow);
        }

        let brand = match self.brands.find_by_id(brand_id).await? {
            Some(brand) => brand,
            None => {
                debug!("Rejecting quote: brand {} does not exist", brand_id.as_i64());
                return Err(QuoteError::UnknownBrand);
            }
        };

        if driver_age < *brand.minimum_driver_age() {
            debug!(
                "Rejecting quote: driver age {} is below the minimum of {} for {}",
                driver_age.as_i32(),
                brand.minimum_driver_age().as_i32(),
                brand.name()
            );
            return Err(QuoteError::RiskTooHigh);
        }

        let yearly_premium = *brand.yearly_premium();
        let monthly_premium = monthly_from_yearly(yearly_premium);
        let quote = self.quotes.save(driver_age, monthly_premium, yearly_premium).await?;
        info!(
            "Issued quote {} for {} at {}/year",
            quote.id().as_i64(),
            brand.name(),
            quote.yearly_premium()
        );
        Ok(Premium::from(&quote))
    }
}
