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

//! Implementation of the database abstraction using PostgreSQL.

use crate::db::{BrandRepository, BrandSeeder, QuoteRepository};
use crate::model::*;
use async_trait::async_trait;
use carquote_core::clocks::Clock;
use carquote_core::db::postgres::{map_sqlx_error, PostgresDb};
use carquote_core::db::DbResult;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::sync::Arc;
use time::OffsetDateTime;

/// Schema to use to initialize the database.
const SCHEMA: &str = include_str!("postgres.sql");

/// Converts a row from the `brands` table into a `Brand`.
fn brand_from_row(row: PgRow) -> DbResult<Brand> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let minimum_driver_age: i32 = row.try_get("minimum_driver_age").map_err(map_sqlx_error)?;
    let yearly_premium: Decimal = row.try_get("yearly_premium").map_err(map_sqlx_error)?;

    Ok(Brand::new(BrandId::new(id), name, DriverAge::new(minimum_driver_age), yearly_premium))
}

/// Converts a row from the `quotes` table into a `Quote`.
fn quote_from_row(row: PgRow) -> DbResult<Quote> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let driver_age: i32 = row.try_get("driver_age").map_err(map_sqlx_error)?;
    let monthly_premium: Decimal = row.try_get("monthly_premium").map_err(map_sqlx_error)?;
    let yearly_premium: Decimal = row.try_get("yearly_premium").map_err(map_sqlx_error)?;
    let created_on: OffsetDateTime = row.try_get("created_on").map_err(map_sqlx_error)?;

    Ok(Quote::new(
        QuoteId::new(id),
        DriverAge::new(driver_age),
        monthly_premium,
        yearly_premium,
        created_on,
    ))
}

/// A store backed by a PostgreSQL database.
pub struct PostgresStore {
    /// Connection pool to the database.
    db: PostgresDb,

    /// Clock used to timestamp new quotes.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl PostgresStore {
    /// Creates a new store on top of `db` that timestamps quotes with `clock`.
    pub fn attach(db: PostgresDb, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, clock }
    }

    /// Creates the tables needed by the store if they do not exist yet.
    pub async fn init_schema(&self) -> DbResult<()> {
        self.db.run_schema(SCHEMA).await
    }

    /// Closes the underlying connection pool.
    pub async fn close(&self) {
        self.db.close().await
    }
}

#[async_trait]
impl BrandSeeder for PostgresStore {
    async fn seed_brands(&self, brands: &[Brand]) -> DbResult<()> {
        let mut conn = self.db.acquire().await?;

        let query_str = "
            INSERT INTO brands (id, name, minimum_driver_age, yearly_premium)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
        ";
        for brand in brands {
            sqlx::query(query_str)
                .bind(brand.id().as_i64())
                .bind(brand.name())
                .bind(brand.minimum_driver_age().as_i32())
                .bind(brand.yearly_premium())
                .execute(&mut *conn)
                .await
                .map_err(map_sqlx_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl BrandRepository for PostgresStore {
    async fn find_by_id(&self, id: BrandId) -> DbResult<Option<Brand>> {
        let mut conn = self.db.acquire().await?;

        let query_str = "SELECT * FROM brands WHERE id = $1";
        let maybe_row = sqlx::query(query_str)
            .bind(id.as_i64())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        maybe_row.map(brand_from_row).transpose()
    }
}

#[async_trait]
impl QuoteRepository for PostgresStore {
    async fn save(
        &self,
        driver_age: DriverAge,
        monthly_premium: Decimal,
        yearly_premium: Decimal,
    ) -> DbResult<Quote> {
        let created_on = self.clock.now_utc();

        let mut conn = self.db.acquire().await?;

        let query_str = "
            INSERT INTO quotes (driver_age, monthly_premium, yearly_premium, created_on)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        ";
        let row = sqlx::query(query_str)
            .bind(driver_age.as_i32())
            .bind(monthly_premium)
            .bind(yearly_premium)
            .bind(created_on)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;

        Ok(Quote::new(QuoteId::new(id), driver_age, monthly_premium, yearly_premium, created_on))
    }

    async fn load(&self, id: QuoteId) -> DbResult<Option<Quote>> {
        let mut conn = self.db.acquire().await?;

        let query_str = "SELECT * FROM quotes WHERE id = $1";
        let maybe_row = sqlx::query(query_str)
            .bind(id.as_i64())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        maybe_row.map(quote_from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::generate_db_tests;
    use carquote_core::clocks::testutils::SettableClock;
    use time::macros::datetime;

    /// Creates a new store in a temporary schema with the default brands.
    async fn setup() -> PostgresStore {
        let clock = Arc::new(SettableClock::new(datetime!(2026-01-15 10:00:00 UTC)));
        let db = carquote_core::db::postgres::testutils::setup().await;
        let store = PostgresStore::attach(db, clock);
        store.init_schema().await.unwrap();
        store.seed_brands(&crate::db::default_brands()).await.unwrap();
        store
    }

    generate_db_tests!(
        setup().await,
        #[ignore = "Requires environment configuration and is expensive"]
    );
}
