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

//! Plumbing shared by the carquote services.
//!
//! Services built on top of this crate follow a layered architecture and are expected to define
//! these modules themselves:
//!
//! 1.  `model`: High-level data types that represent concepts in the domain of the service.
//!     There should be no logic in here beyond validation at construction time.
//!
//! 1.  `db`: The persistence layer.  Services describe the storage operations they need as traits
//!     and provide one implementation per backend.  Callers only ever see the traits.
//!
//! 1.  `driver`: The business logic layer.  A `Driver` type receives its storage dependencies at
//!     construction time and coordinates the calls into them.
//!
//! 1.  `rest`: The HTTP layer.  It translates requests into driver calls and driver errors into
//!     HTTP status codes.
//!
//! 1.  `main`: The launcher.  Its sole purpose is to gather configuration from the environment
//!     and to call the service's `serve` function.
//!
//! Every layer has its own result and error types, such as `DbResult` and `DbError`, so that
//! errors can float to the top of the service via `?` and get translated to status codes once
//! they leave the REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod env;
pub mod model;
pub mod rest;
