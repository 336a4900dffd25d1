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

//! Entry point to the REST server.

use crate::driver::{Driver, QuoteError};
use axum::Router;
use carquote_core::rest::RestError;
use log::error;

mod quote_get;
mod quote_post;
#[cfg(test)]
mod testutils;
mod validation;

impl From<QuoteError> for RestError {
    fn from(e: QuoteError) -> Self {
        match e {
            e if e.is_rule_violation() => RestError::Conflict(e.to_string()),
            QuoteError::NotFound(msg) => RestError::NotFound(msg),
            e => {
                error!("Failing request due to: {}", e);
                RestError::InternalError("Internal server error".to_owned())
            }
        }
    }
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{get, post};
    Router::new()
        .route("/api/v1/quotes", post(quote_post::handler))
        .route("/api/v1/quotes/:id", get(quote_get::handler))
        .with_state(driver)
}
