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

//! Test utilities for the REST API.

use crate::db::sqlite::{testutils as sqlite_testutils, SqliteStore};
use crate::db::QuoteRepository;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use rust_decimal::Decimal;
use std::sync::Arc;

pub(crate) struct TestContext {
    store: Arc<SqliteStore>,
    app: Router,
}

impl TestContext {
    pub(crate) async fn setup() -> Self {
        let store = Arc::new(sqlite_testutils::setup().await);
        let driver = Driver::new(store.clone(), store.clone());
        let app = app(driver);
        Self { store, app }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    pub(crate) async fn save_quote(&self, driver_age: i32, monthly: i64, yearly: i64) -> Quote {
        self.store
            .save(DriverAge::new(driver_age), Decimal::from(monthly), Decimal::from(yearly))
            .await
            .unwrap()
    }

    pub(crate) async fn get_quote(&self, id: QuoteId) -> Option<Quote> {
        self.store.load(id).await.unwrap()
    }
}
