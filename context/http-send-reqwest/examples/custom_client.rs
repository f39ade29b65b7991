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

//! Fetch the device fingerprint script location with a custom reqwest client.
//!
//! ```shell
//! SECUREAUTH_HOST=sa.example.com SECUREAUTH_PORT=443 SECUREAUTH_REALM=secureauth1 \
//! SECUREAUTH_APPLICATION_ID=... SECUREAUTH_APPLICATION_KEY=... \
//! cargo run --example custom_client
//! ```

use anyhow::Result;
use reqwest::Client;
use secureauth_core::{Config, Context, Executor, OsEnv, RequestSigner, SigningMethod};
use secureauth_http_send_reqwest::ReqwestHttpSend;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let config = Config::default().from_env(&Context::new().with_env(OsEnv));
    let cred = config.to_credential()?;

    // Create a custom reqwest client with specific configuration
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("secureauth-example/1.0")
        .danger_accept_invalid_certs(cred.base_url().trust_self_signed())
        .build()?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
    let executor = Executor::new(ctx);

    let path = format!("/{}/api/v1/dfp/js", cred.realm());
    let token = RequestSigner::new().sign_request(&cred, SigningMethod::Get, &path, None)?;

    let url = format!("{}{}", cred.appliance_url(), path);
    println!("GET {url}");

    match executor
        .execute::<serde_json::Value>(SigningMethod::Get, &url, &token, None)
        .await
    {
        Ok(resp) => println!("{resp:#}"),
        Err(e) => eprintln!("Request failed: {e}"),
    }

    Ok(())
}
