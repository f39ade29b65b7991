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

use crate::utils::Redact;
use crate::{Error, Result};
use std::fmt::{Debug, Formatter};

/// Address of the appliance every request of a client is sent to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    host: String,
    port: u16,
    use_tls: bool,
    trust_self_signed: bool,
}

impl BaseUrl {
    /// Host name of the appliance.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port of the web application on the appliance.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether requests are sent over https.
    pub fn use_tls(&self) -> bool {
        self.use_tls
    }

    /// Whether the appliance certificate chain is left unverified.
    pub fn trust_self_signed(&self) -> bool {
        self.trust_self_signed
    }

    /// `scheme://host:port` of the appliance, without trailing slash.
    pub fn appliance_url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

/// Credential binds a realm and its application id/key pair to an appliance.
///
/// It's immutable once built. The application key is only readable inside this
/// crate and is never printed, `Debug` always masks it.
#[derive(Clone)]
pub struct Credential {
    realm: String,
    application_id: String,
    application_key: String,
    base_url: BaseUrl,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("realm", &self.realm)
            .field("application_id", &Redact::from(&self.application_id))
            .field("application_key", &Redact::secret(&self.application_key))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Credential {
    /// Create a new credential.
    ///
    /// `port` is accepted as text the way it's usually configured, it must be
    /// a positive 16-bit integer.
    pub fn new(
        host: &str,
        port: &str,
        use_tls: bool,
        realm: &str,
        application_id: &str,
        application_key: &str,
    ) -> Result<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(Error::config_invalid("host must not be empty"));
        }
        if realm.is_empty() {
            return Err(Error::config_invalid("realm must not be empty"));
        }
        if application_id.is_empty() {
            return Err(Error::config_invalid("application id must not be empty"));
        }
        if application_key.is_empty() {
            return Err(Error::config_invalid("application key must not be empty"));
        }

        let port = match port.trim().parse::<u16>() {
            Ok(0) => return Err(Error::config_invalid("port must be positive")),
            Ok(v) => v,
            Err(e) => {
                return Err(
                    Error::config_invalid(format!("port {port:?} is not a valid port"))
                        .with_source(e),
                )
            }
        };

        Ok(Self {
            realm: realm.to_string(),
            application_id: application_id.to_string(),
            application_key: application_key.to_string(),
            base_url: BaseUrl {
                host: host.to_string(),
                port,
                use_tls,
                trust_self_signed: false,
            },
        })
    }

    /// Accept self-signed appliance certificates.
    ///
    /// The connection is still encrypted, only the chain validation is skipped.
    pub fn with_trust_self_signed(mut self, trust_self_signed: bool) -> Self {
        self.base_url.trust_self_signed = trust_self_signed;
        self
    }

    /// Realm the application belongs to.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Application id within the realm.
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Address of the appliance.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// `scheme://host:port` of the appliance.
    pub fn appliance_url(&self) -> String {
        self.base_url.appliance_url()
    }

    pub(crate) fn application_key(&self) -> &str {
        &self.application_key
    }

    #[cfg(test)]
    pub(crate) fn without_key(mut self) -> Self {
        self.application_key.clear();
        self
    }
}
