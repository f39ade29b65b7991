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

//! Core components for talking to the SecureAuth identity and risk appliance.
//!
//! This crate provides the request authentication and execution pipeline the
//! `secureauth` client is built on.
//!
//! ## Overview
//!
//! - **Credential**: the immutable realm, application id/key pair and appliance address
//! - **Signing**: [`sign`] binds method, path, body and timestamp of one request
//!   to the application key and produces its [`AuthorizationToken`]
//! - **Execution**: [`Executor`] sends a signed request through the [`HttpSend`]
//!   configured in the [`Context`] and decodes the typed response
//!
//! ## Example
//!
//! ```no_run
//! use secureauth_core::{json_body, Context, Credential, Executor, RequestSigner, SigningMethod};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Status {
//!     status: String,
//! }
//!
//! # async fn example(ctx: Context) -> secureauth_core::Result<()> {
//! let cred = Credential::new("sa.example.com", "443", true, "secureauth1", "app-id", "app-key")?;
//! let executor = Executor::new(ctx);
//!
//! let path = format!("/{}/api/v1/auth", cred.realm());
//! let body = json_body(&serde_json::json!({"user_id": "jdoe", "type": "user_id"}))?;
//! let token = RequestSigner::new().sign_request(&cred, SigningMethod::Post, &path, Some(&body))?;
//!
//! let url = format!("{}{}", cred.appliance_url(), path);
//! let resp: Status = executor.execute(SigningMethod::Post, &url, &token, Some(body)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC and base64 helpers
//! - [`time`]: http date formatting
//! - [`utils`]: redaction of secrets in debug output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod constants;
pub use constants::*;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod encode;
pub use encode::{encode_identifier, encode_identifier_utf8, wire_path, IdentifierEncoding};

mod credential;
pub use credential::{BaseUrl, Credential};

mod config;
pub use config::Config;

mod sign_request;
pub use sign_request::{sign, AuthorizationToken, RequestSigner, SigningMethod, SigningRequest};

mod execute;
pub use execute::{json_body, Executor};
