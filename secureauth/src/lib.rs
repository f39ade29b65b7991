// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Client for the SecureAuth identity and risk REST appliance.
//!
//! Every call is signed with the realm's application key, sent once and
//! decoded into a typed response. Failures come back as
//! [`Error`](secureauth_core::Error) whose [`ErrorKind`](secureauth_core::ErrorKind)
//! tells configuration, signing, transport and response shape problems apart.
//! Rejections reported by the appliance itself are regular responses, check
//! [`ResponseStatus::is_success`].
//!
//! ## Example
//!
//! ```no_run
//! use secureauth::{Client, Config, Context, OsEnv, ResponseStatus};
//!
//! #[tokio::main]
//! async fn main() -> secureauth::Result<()> {
//!     let config = Config::default().from_env(&Context::new().with_env(OsEnv));
//!     let client = Client::from_config(&config)?;
//!
//!     let resp = client.validate_user_password("jdoe", "p@ssw0rd").await?;
//!     if !resp.is_success() {
//!         println!("rejected: {}", resp.message);
//!     }
//!     Ok(())
//! }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub use secureauth_core::*;

mod context;
pub use context::default_context;

mod paths;
pub use paths::Paths;

pub mod requests;
pub mod responses;
pub use responses::ResponseStatus;

mod client;
pub use client::Client;
