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

//! Database abstraction in terms of the operations needed by the service.

use crate::model::*;
use async_trait::async_trait;
use carquote_core::db::DbResult;
use rust_decimal::Decimal;

pub mod memory;
pub mod postgres;
pub mod sqlite;

/// Read access to the catalog of car brands.
#[async_trait]
pub trait BrandRepository {
    /// Gets the brand identified by `id`, or `None` if it does not exist.
    async fn find_by_id(&self, id: BrandId) -> DbResult<Option<Brand>>;
}

/// Write access to the catalog of car brands, used to prepare a store before it serves requests.
#[async_trait]
pub trait BrandSeeder {
    /// Adds `brands` to the catalog.  Brands whose identifier already exists are left untouched.
    async fn seed_brands(&self, brands: &[Brand]) -> DbResult<()>;
}

/// Storage for the quotes produced by the service.
#[async_trait]
pub trait QuoteRepository {
    /// Persists a new quote and returns it with its freshly-assigned identifier and creation
    /// time.
    async fn save(
        &self,
        driver_age: DriverAge,
        monthly_premium: Decimal,
        yearly_premium: Decimal,
    ) -> DbResult<Quote>;

    /// Gets the quote identified by `id`, or `None` if it does not exist.
    async fn load(&self, id: QuoteId) -> DbResult<Option<Quote>>;
}

/// Returns the catalog of brands that a fresh deployment starts with.
pub fn default_brands() -> Vec<Brand> {
    vec![
        Brand::new(BrandId::new(1), "Audi".to_owned(), DriverAge::new(18), Decimal::from(250)),
        Brand::new(BrandId::new(2), "BMW".to_owned(), DriverAge::new(18), Decimal::from(150)),
        Brand::new(BrandId::new(3), "Porsche".to_owned(), DriverAge::new(25), Decimal::from(500)),
    ]
}
