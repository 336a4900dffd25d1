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

//! API to get a previously-issued quote.

use crate::driver::{Driver, QuoteError};
use crate::model::QuoteId;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use carquote_core::rest::{EmptyBody, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<QuoteId>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    match driver.get_by_id(id).await? {
        Some(premium) => Ok(Json(premium)),
        None => Err(QuoteError::NotFound(format!("Quote {} not found", id.as_i64())).into()),
    }
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use carquote_core::rest::testutils::*;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::GET, format!("/api/v1/quotes/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let quote = context.save_quote(30, 42, 500).await;

        let response = OneShotBuilder::new(context.app(), route(quote.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<Premium>()
            .await;
        assert_eq!(Premium::from(&quote), response);
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let context = TestContext::setup().await;

        let quote = context.save_quote(18, 21, 250).await;

        let mut responses = vec![];
        for _ in 0..2 {
            let response = OneShotBuilder::new(context.app(), route(quote.id().as_i64()))
                .send_empty()
                .await
                .expect_json::<Premium>()
                .await;
            responses.push(response);
        }
        assert_eq!(responses[0], responses[1]);
        assert_eq!(Some(quote), context.get_quote(responses[0].id).await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(12345))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Quote 12345 not found")
            .await;
    }

    #[tokio::test]
    async fn test_bad_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), (http::Method::GET, "/api/v1/quotes/abc"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_text("Cannot parse")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
