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

//! API to compute the premium of a new quote.

use crate::driver::Driver;
use crate::rest::validation::{validate, QuoteRequest};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{http, Json};
use carquote_core::rest::RestError;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<QuoteRequest>,
) -> Result<(http::StatusCode, impl IntoResponse), RestError> {
    let quote = validate(&request).map_err(RestError::ValidationFailed)?;
    let premium =
        driver.calculate_premium(quote.driver_age, quote.brand_id, quote.purchase_price).await?;
    Ok((http::StatusCode::CREATED, Json(premium)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::rest::testutils::*;
    use carquote_core::rest::testutils::*;
    use carquote_core::rest::FieldError;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/api/v1/quotes".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(json!({"driverAge": 18, "brandId": 1, "purchasePrice": 40000}))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Premium>()
            .await;
        assert_eq!(dec!(21), response.monthly_premium);
        assert_eq!(dec!(250), response.yearly_premium);

        let quote = context.get_quote(response.id).await.unwrap();
        assert_eq!(DriverAge::new(18), *quote.driver_age());
        assert_eq!(Premium::from(&quote), response);
    }

    #[tokio::test]
    async fn test_unknown_brand() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({"driverAge": 18, "brandId": 101, "purchasePrice": 37500}))
            .await
            .expect_status(http::StatusCode::CONFLICT)
            .expect_error("Unknown car brand")
            .await;
    }

    #[tokio::test]
    async fn test_purchase_price_too_low() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({"driverAge": 18, "brandId": 2, "purchasePrice": 4000}))
            .await
            .expect_status(http::StatusCode::CONFLICT)
            .expect_error("Purchase price is too low")
            .await;
    }

    #[tokio::test]
    async fn test_driver_too_young() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({"driverAge": 17, "brandId": 3, "purchasePrice": 55000}))
            .await
            .expect_status(http::StatusCode::CONFLICT)
            .expect_error("Driver is too young")
            .await;
    }

    #[tokio::test]
    async fn test_risk_too_high() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({"driverAge": 18, "brandId": 3, "purchasePrice": 75000}))
            .await
            .expect_status(http::StatusCode::CONFLICT)
            .expect_error("Risk is too high")
            .await;

        assert_eq!(None, context.get_quote(QuoteId::new(1)).await);
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(json!({"driverAge": "eighteen", "purchasePrice": 40000}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("validation failed")
            .await;
        assert_eq!(
            vec![
                FieldError::new("driverAge", "driverAge must be a number"),
                FieldError::new("brandId", "brandId is required"),
            ],
            response.errors
        );

        assert_eq!(None, context.get_quote(QuoteId::new(1)).await);
    }

    #[tokio::test]
    async fn test_array_payload_is_rejected() {
        let context = TestContext::setup().await;

        for payload in [json!([18, 1, 40000]), json!([1, 2])] {
            OneShotBuilder::new(context.app(), route())
                .send_json(payload)
                .await
                .expect_status(http::StatusCode::UNPROCESSABLE_ENTITY)
                .expect_text("expected a map")
                .await;
        }

        assert_eq!(None, context.get_quote(QuoteId::new(1)).await);
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}
