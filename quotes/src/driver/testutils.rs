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

//! Test utilities for the business layer.

use crate::db::memory::MemoryStore;
use crate::db::{default_brands, BrandRepository, BrandSeeder, QuoteRepository};
use crate::driver::Driver;
use crate::model::*;
use async_trait::async_trait;
use carquote_core::clocks::testutils::SettableClock;
use carquote_core::db::{DbError, DbResult};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use time::macros::datetime;
use time::OffsetDateTime;

/// Instant at which the test clock starts.
pub(crate) const START_TIME: OffsetDateTime = datetime!(2026-01-15 10:00:00 UTC);

/// A store that records the calls it receives and that can be told to fail.
pub(crate) struct SpyStore {
    /// Store that serves the calls that do not fail.
    inner: MemoryStore,

    /// Number of calls to `find_by_id`.
    lookups: AtomicUsize,

    /// Number of calls to `save`.
    saves: AtomicUsize,

    /// Whether all calls should fail with `DbError::Unavailable`.
    fail: AtomicBool,
}

impl SpyStore {
    /// Returns the number of brand lookups issued so far.
    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Returns the number of quote saves issued so far.
    pub(crate) fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Makes all subsequent calls fail.
    pub(crate) fn set_fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Returns an error if the store was told to fail.
    fn maybe_fail(&self) -> DbResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(DbError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BrandRepository for SpyStore {
    async fn find_by_id(&self, id: BrandId) -> DbResult<Option<Brand>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail()?;
        self.inner.find_by_id(id).await
    }
}

#[async_trait]
impl QuoteRepository for SpyStore {
    async fn save(
        &self,
        driver_age: DriverAge,
        monthly_premium: Decimal,
        yearly_premium: Decimal,
    ) -> DbResult<Quote> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail()?;
        self.inner.save(driver_age, monthly_premium, yearly_premium).await
    }

    async fn load(&self, id: QuoteId) -> DbResult<Option<Quote>> {
        self.maybe_fail()?;
        self.inner.load(id).await
    }
}

pub(crate) struct TestContext {
    clock: Arc<SettableClock>,
    store: Arc<SpyStore>,
    driver: Driver,
}

impl TestContext {
    pub(crate) async fn setup() -> Self {
        let _can_fail = env_logger::builder().is_test(true).try_init();

        let clock = Arc::new(SettableClock::new(START_TIME));
        let inner = MemoryStore::new(clock.clone());
        inner.seed_brands(&default_brands()).await.unwrap();
        let store = Arc::new(SpyStore {
            inner,
            lookups: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        });
        let driver = Driver::new(store.clone(), store.clone());
        Self { clock, store, driver }
    }

    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    pub(crate) fn store(&self) -> &SpyStore {
        &self.store
    }

    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }
}
