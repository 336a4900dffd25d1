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

//! Configuration of the service.

use carquote_core::db::postgres::PostgresOptions;
use carquote_core::env::{get_optional_var, get_required_var};

/// Default port to listen on.
const DEFAULT_PORT: u16 = 3000;

/// Prefix of the variables that configure the production database.
const PGSQL_PREFIX: &str = "PGSQL_PROD";

/// Storage backend to keep brands and quotes in.
#[derive(Debug)]
pub enum Backend {
    /// Keep everything in memory.  Data is lost on exit.
    Memory,

    /// Use the SQLite database at the given path.
    Sqlite(String),

    /// Use a PostgreSQL database.
    Postgres(PostgresOptions),
}

/// Settings to start the service with.
#[derive(Debug)]
pub struct ServiceOptions {
    /// Port to listen on.
    pub port: u16,

    /// Storage backend to use.
    pub backend: Backend,
}

impl ServiceOptions {
    /// Initializes the options from environment variables whose name is prefixed with `prefix`.
    ///
    /// This will use `<prefix>_PORT`, `<prefix>_BACKEND` and, when the backend is `sqlite`,
    /// `<prefix>_SQLITE_PATH`.  The `postgres` backend, which is the default, is configured via
    /// the `PGSQL_PROD_*` variables.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let port = get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT);

        let backend = match get_optional_var::<String>(prefix, "BACKEND")?.as_deref() {
            Some("memory") => Backend::Memory,
            Some("sqlite") => Backend::Sqlite(get_required_var::<String>(prefix, "SQLITE_PATH")?),
            Some("postgres") | None => Backend::Postgres(PostgresOptions::from_env(PGSQL_PREFIX)?),
            Some(other) => {
                return Err(format!(
                    "Invalid backend '{}' in {}_BACKEND; must be memory, sqlite or postgres",
                    other, prefix
                ))
            }
        };

        Ok(Self { port, backend })
    }
}
