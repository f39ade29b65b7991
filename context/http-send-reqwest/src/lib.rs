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

//! [`HttpSend`] implementation backed by [`reqwest`].
//!
//! One [`ReqwestHttpSend`] owns one pooled [`Client`], build it once per
//! appliance and share it between calls.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Request};
use secureauth_core::{Config, Error, HttpSend, Result};

/// ReqwestHttpSend sends requests with a shared reqwest [`Client`].
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build the client the way `config` asks for.
    ///
    /// - `trust_self_signed` disables certificate chain validation, the
    ///   connection still negotiates TLS.
    /// - `connect_timeout` and `timeout` bound each call, there is no retry.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .danger_accept_invalid_certs(config.trust_self_signed.unwrap_or_default());
        if let Some(v) = config.connect_timeout {
            builder = builder.connect_timeout(v);
        }
        if let Some(v) = config.timeout {
            builder = builder.timeout(v);
        }

        let client = builder
            .build()
            .map_err(|e| Error::config_invalid("failed to build http client").with_source(e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("invalid http request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(transport_error)?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(transport_error)?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    debug!("http send failed: {e:?}");

    let message = if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "failed to connect to appliance"
    } else {
        "http request failed"
    };
    Error::transport(message).with_source(e)
}
