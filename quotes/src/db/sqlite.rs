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

//! Implementation of the database abstraction using SQLite.

use crate::db::{BrandRepository, BrandSeeder, QuoteRepository};
use crate::model::*;
use async_trait::async_trait;
use carquote_core::clocks::Clock;
use carquote_core::db::sqlite::{build_timestamp, map_sqlx_error, unpack_timestamp, SqliteDb};
use carquote_core::db::{DbError, DbResult};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;
use std::sync::Arc;

/// Schema to use to initialize the database.
const SCHEMA: &str = include_str!("sqlite.sql");

/// Parses a decimal `value` stored in the `column` as text.
fn parse_decimal(column: &str, value: &str) -> DbResult<Decimal> {
    Decimal::from_str(value)
        .map_err(|e| DbError::DataIntegrityError(format!("Invalid {} '{}': {}", column, value, e)))
}

/// Converts a row from the `brands` table into a `Brand`.
fn brand_from_row(row: SqliteRow) -> DbResult<Brand> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let minimum_driver_age: i64 = row.try_get("minimum_driver_age").map_err(map_sqlx_error)?;
    let yearly_premium: String = row.try_get("yearly_premium").map_err(map_sqlx_error)?;

    Ok(Brand::new(
        BrandId::new(id),
        name,
        DriverAge::from_i64(minimum_driver_age)?,
        parse_decimal("yearly_premium", &yearly_premium)?,
    ))
}

/// Converts a row from the `quotes` table into a `Quote`.
fn quote_from_row(row: SqliteRow) -> DbResult<Quote> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let driver_age: i64 = row.try_get("driver_age").map_err(map_sqlx_error)?;
    let monthly_premium: String = row.try_get("monthly_premium").map_err(map_sqlx_error)?;
    let yearly_premium: String = row.try_get("yearly_premium").map_err(map_sqlx_error)?;
    let created_on_secs: i64 = row.try_get("created_on_secs").map_err(map_sqlx_error)?;
    let created_on_nsecs: i64 = row.try_get("created_on_nsecs").map_err(map_sqlx_error)?;

    Ok(Quote::new(
        QuoteId::new(id),
        DriverAge::from_i64(driver_age)?,
        parse_decimal("monthly_premium", &monthly_premium)?,
        parse_decimal("yearly_premium", &yearly_premium)?,
        build_timestamp(created_on_secs, created_on_nsecs)?,
    ))
}

/// A store backed by an SQLite database.
pub struct SqliteStore {
    /// Connection pool to the database.
    db: SqliteDb,

    /// Clock used to timestamp new quotes.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl SqliteStore {
    /// Creates a new store on top of an already-connected `db` that timestamps quotes with
    /// `clock`.
    pub fn attach(db: SqliteDb, clock: Arc<dyn Clock + Send + Sync>) -> Self {
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
impl BrandSeeder for SqliteStore {
    async fn seed_brands(&self, brands: &[Brand]) -> DbResult<()> {
        let mut conn = self.db.acquire().await?;

        let query_str = "
            INSERT INTO brands (id, name, minimum_driver_age, yearly_premium)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (id) DO NOTHING
        ";
        for brand in brands {
            sqlx::query(query_str)
                .bind(brand.id().as_i64())
                .bind(brand.name())
                .bind(brand.minimum_driver_age().as_i32())
                .bind(brand.yearly_premium().to_string())
                .execute(&mut *conn)
                .await
                .map_err(map_sqlx_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl BrandRepository for SqliteStore {
    async fn find_by_id(&self, id: BrandId) -> DbResult<Option<Brand>> {
        let mut conn = self.db.acquire().await?;

        let query_str = "SELECT * FROM brands WHERE id = ?";
        let maybe_row = sqlx::query(query_str)
            .bind(id.as_i64())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        maybe_row.map(brand_from_row).transpose()
    }
}

#[async_trait]
impl QuoteRepository for SqliteStore {
    async fn save(
        &self,
        driver_age: DriverAge,
        monthly_premium: Decimal,
        yearly_premium: Decimal,
    ) -> DbResult<Quote> {
        let created_on = self.clock.now_utc();
        let (created_on_secs, created_on_nsecs) = unpack_timestamp(created_on)?;

        let mut conn = self.db.acquire().await?;

        let query_str = "
            INSERT INTO quotes
                (driver_age, monthly_premium, yearly_premium, created_on_secs, created_on_nsecs)
            VALUES (?, ?, ?, ?, ?)
        ";
        let done = sqlx::query(query_str)
            .bind(driver_age.as_i32())
            .bind(monthly_premium.to_string())
            .bind(yearly_premium.to_string())
            .bind(created_on_secs)
            .bind(created_on_nsecs)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        if done.rows_affected() != 1 {
            return Err(DbError::BackendError("Insertion affected more than one row".to_owned()));
        }

        Ok(Quote::new(
            QuoteId::new(done.last_insert_rowid()),
            driver_age,
            monthly_premium,
            yearly_premium,
            created_on,
        ))
    }

    async fn load(&self, id: QuoteId) -> DbResult<Option<Quote>> {
        let mut conn = self.db.acquire().await?;

        let query_str = "SELECT * FROM quotes WHERE id = ?";
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
    use super::testutils::*;
    use super::*;
    use crate::db::tests::generate_db_tests;

    generate_db_tests!(setup().await);

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let store = setup().await;
        store.init_schema().await.unwrap();
        assert!(store.find_by_id(BrandId::new(1)).await.unwrap().is_some());
        store.close().await;
    }

    #[tokio::test]
    async fn test_load_corrupt_premium_is_data_integrity_error() {
        let store = setup().await;
        let quote =
            store.save(DriverAge::new(30), Decimal::from(21), Decimal::from(250)).await.unwrap();

        let mut conn = store.db.acquire().await.unwrap();
        sqlx::query("UPDATE quotes SET monthly_premium = 'lots' WHERE id = ?")
            .bind(quote.id().as_i64())
            .execute(&mut *conn)
            .await
            .unwrap();
        drop(conn);

        match store.load(*quote.id()).await {
            Err(DbError::DataIntegrityError(msg)) => assert!(msg.contains("monthly_premium")),
            e => panic!("Unexpected result: {:?}", e),
        }
        store.close().await;
    }

    #[tokio::test]
    async fn test_timestamps_keep_clock_precision() {
        let (store, clock) = setup_with_clock().await;
        clock.advance(std::time::Duration::from_micros(123_456));

        let quote =
            store.save(DriverAge::new(30), Decimal::from(21), Decimal::from(250)).await.unwrap();
        assert_eq!(clock.now_utc(), *quote.created_on());
        assert_eq!(Some(quote), store.load(QuoteId::new(1)).await.unwrap());
        store.close().await;
    }
}
