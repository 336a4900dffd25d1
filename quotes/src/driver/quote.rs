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

//! Operations on previously-issued quotes.

use crate::driver::{Driver, QuoteResult};
use crate::model::*;

impl Driver {
    /// Gets the premium of the quote identified by `id`, or `None` if there is no such quote.
    pub async fn get_by_id(self, id: QuoteId) -> QuoteResult<Option<Premium>> {
        let quote = self.quotes.load(id).await?;
        Ok(quote.as_ref().map(Premium::from))
    }
}
