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

use anyhow::Result;
use secureauth::{Client, ResponseStatus};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    // Pick up SECUREAUTH_* from a local .env when there is one.
    dotenv::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let user_id = args.next().unwrap_or_else(|| "jdoe".to_string());
    let password = args.next();

    let client = Client::from_env()?;

    let resp = client.validate_user(&user_id).await?;
    println!("user {user_id}: {} {}", resp.status, resp.message);
    if !resp.is_success() {
        return Ok(());
    }

    let factors = client.factors_by_user(&user_id).await?;
    for factor in &factors.factors {
        println!("  factor {} ({}): {}", factor.id, factor.kind, factor.value);
    }

    if let Some(password) = password {
        let resp = client.validate_user_password(&user_id, &password).await?;
        println!("password: {} {}", resp.status, resp.message);
    }

    Ok(())
}
