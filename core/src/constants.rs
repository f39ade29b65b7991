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

// Env values used to configure the client.

/// Env name for the appliance host.
pub const SECUREAUTH_HOST: &str = "SECUREAUTH_HOST";
/// Env name for the appliance port.
pub const SECUREAUTH_PORT: &str = "SECUREAUTH_PORT";
/// Env name for using https.
pub const SECUREAUTH_USE_TLS: &str = "SECUREAUTH_USE_TLS";
/// Env name for accepting self-signed certificates.
pub const SECUREAUTH_TRUST_SELF_SIGNED: &str = "SECUREAUTH_TRUST_SELF_SIGNED";
/// Env name for the realm.
pub const SECUREAUTH_REALM: &str = "SECUREAUTH_REALM";
/// Env name for the application id.
pub const SECUREAUTH_APPLICATION_ID: &str = "SECUREAUTH_APPLICATION_ID";
/// Env name for the application key.
pub const SECUREAUTH_APPLICATION_KEY: &str = "SECUREAUTH_APPLICATION_KEY";
/// Env name for the connect timeout in seconds.
pub const SECUREAUTH_CONNECT_TIMEOUT: &str = "SECUREAUTH_CONNECT_TIMEOUT";
/// Env name for the request timeout in seconds.
pub const SECUREAUTH_TIMEOUT: &str = "SECUREAUTH_TIMEOUT";
/// Env name for switching identifiers to UTF-8 percent-encoding.
pub const SECUREAUTH_UTF8_IDENTIFIERS: &str = "SECUREAUTH_UTF8_IDENTIFIERS";
