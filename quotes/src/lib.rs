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

//! REST service that quotes car insurance premiums.
//!
//! A quote request names the age of the driver, the brand of the car and its purchase price.  The
//! request is checked against a fixed sequence of rules and, if all of them pass, a quote with the
//! yearly and monthly premiums for the brand is persisted and returned.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use carquote_core::clocks::SystemClock;
use carquote_core::db::postgres::PostgresDb;
use carquote_core::db::sqlite::SqliteDb;
use log::{info, warn};
use std::error::Error;
use std::net::Ipv4Addr;
use std::sync::Arc;

pub mod config;
use config::{Backend, ServiceOptions};
pub mod db;
use db::memory::MemoryStore;
use db::postgres::PostgresStore;
use db::sqlite::SqliteStore;
use db::{default_brands, BrandRepository, BrandSeeder, QuoteRepository};
pub mod driver;
use driver::Driver;
pub mod model;
mod rest;
use rest::app;

/// Waits until the process is asked to terminate.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for termination signals: {}", e);
    }
    info!("Shutting down");
}

/// Serves `driver` on `port` until the process is asked to terminate.
async fn run(port: u16, driver: Driver) -> Result<(), Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app(driver)).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

/// Creates a driver where a single `store` serves both brands and quotes.
fn driver_for<S>(store: Arc<S>) -> Driver
where
    S: BrandRepository + QuoteRepository + Send + Sync + 'static,
{
    Driver::new(store.clone(), store)
}

/// Instantiates all resources to serve the application as configured by `opts`.
///
/// The backend is prepared before the server starts listening: its schema is created if needed and
/// the default brands are added to it.  Pools are closed once the server stops.
pub async fn serve(opts: ServiceOptions) -> Result<(), Box<dyn Error>> {
    let clock = Arc::new(SystemClock::default());

    match opts.backend {
        Backend::Memory => {
            info!("Using in-memory storage");
            let store = Arc::new(MemoryStore::new(clock));
            store.seed_brands(&default_brands()).await?;
            run(opts.port, driver_for(store)).await
        }

        Backend::Sqlite(path) => {
            info!("Using SQLite storage at {}", path);
            let db = SqliteDb::connect(&path).await?;
            let store = Arc::new(SqliteStore::attach(db, clock));
            store.init_schema().await?;
            store.seed_brands(&default_brands()).await?;
            let result = run(opts.port, driver_for(store.clone())).await;
            store.close().await;
            result
        }

        Backend::Postgres(pg_opts) => {
            info!("Using PostgreSQL storage at {}:{}", pg_opts.host, pg_opts.port);
            let db = PostgresDb::connect(pg_opts)?;
            let store = Arc::new(PostgresStore::attach(db, clock));
            store.init_schema().await?;
            store.seed_brands(&default_brands()).await?;
            let result = run(opts.port, driver_for(store.clone())).await;
            store.close().await;
            result
        }
    }
}
