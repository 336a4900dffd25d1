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

//! Implementation of the database abstraction that keeps all data in memory.

use crate::db::{BrandRepository, BrandSeeder, QuoteRepository};
use crate::model::*;
use async_trait::async_trait;
use carquote_core::clocks::Clock;
use carquote_core::db::{DbError, DbResult};
use futures::lock::Mutex;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Contents of the in-memory store.
#[derive(Default)]
struct Tables {
    /// All known brands, keyed by their identifier.
    brands: HashMap<BrandId, Brand>,

    /// All saved quotes, keyed by their identifier.
    quotes: BTreeMap<QuoteId, Quote>,

    /// Identifier assigned to the most recently saved quote.
    last_id: i64,
}

/// A store that keeps brands and quotes in process memory.  Data is lost on exit.
pub struct MemoryStore {
    /// Clock used to timestamp new quotes.
    clock: Arc<dyn Clock + Send + Sync>,

    /// The actual data, guarded so that id assignment and insertion happen atomically.
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates a new empty store that timestamps quotes with `clock`.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { clock, tables: Mutex::new(Tables::default()) }
    }
}

#[async_trait]
impl BrandSeeder for MemoryStore {
    async fn seed_brands(&self, brands: &[Brand]) -> DbResult<()> {
        let mut tables = self.tables.lock().await;
        for brand in brands {
            tables.brands.entry(*brand.id()).or_insert_with(|| brand.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl BrandRepository for MemoryStore {
    async fn find_by_id(&self, id: BrandId) -> DbResult<Option<Brand>> {
        let tables = self.tables.lock().await;
        Ok(tables.brands.get(&id).cloned())
    }
}

#[async_trait]
impl QuoteRepository for MemoryStore {
    async fn save(
        &self,
        driver_age: DriverAge,
        monthly_premium: Decimal,
        yearly_premium: Decimal,
    ) -> DbResult<Quote> {
        let mut tables = self.tables.lock().await;

        let next_id = tables
            .last_id
            .checked_add(1)
            .ok_or_else(|| DbError::BackendError("Quote identifiers exhausted".to_owned()))?;
        let quote = Quote::new(
            QuoteId::new(next_id),
            driver_age,
            monthly_premium,
            yearly_premium,
            self.clock.now_utc(),
        );
        tables.last_id = next_id;
        tables.quotes.insert(*quote.id(), quote.clone());
        Ok(quote)
    }

    async fn load(&self, id: QuoteId) -> DbResult<Option<Quote>> {
        let tables = self.tables.lock().await;
        Ok(tables.quotes.get(&id).cloned())
    }
}
