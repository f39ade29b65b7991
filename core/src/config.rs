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

use crate::constants::*;
use crate::utils::Redact;
use crate::{Context, Credential, Error, IdentifierEncoding, Result};
use log::warn;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

/// Config carries all the configuration for a SecureAuth client.
#[derive(Clone, Default)]
pub struct Config {
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SECUREAUTH_HOST`]
    pub host: Option<String>,
    /// `port` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SECUREAUTH_PORT`]
    pub port: Option<String>,
    /// `use_tls` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SECUREAUTH_USE_TLS`]
    /// - default to `true`
    pub use_tls: Option<bool>,
    /// `trust_self_signed` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SECUREAUTH_TRUST_SELF_SIGNED`]
    /// - default to `false`
    pub trust_self_signed: Option<bool>,
    /// `realm` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SECUREAUTH_REALM`]
    pub realm: Option<String>,
    /// `application_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SECUREAUTH_APPLICATION_ID`]
    pub application_id: Option<String>,
    /// `application_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SECUREAUTH_APPLICATION_KEY`]
    pub application_key: Option<String>,
    /// `connect_timeout` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SECUREAUTH_CONNECT_TIMEOUT`] in seconds
    pub connect_timeout: Option<Duration>,
    /// `timeout` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SECUREAUTH_TIMEOUT`] in seconds
    pub timeout: Option<Duration>,
    /// `utf8_identifiers` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SECUREAUTH_UTF8_IDENTIFIERS`]
    /// - default to `false`, identifiers are escaped the legacy way
    pub utf8_identifiers: Option<bool>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("use_tls", &self.use_tls)
            .field("trust_self_signed", &self.trust_self_signed)
            .field("realm", &self.realm)
            .field(
                "application_id",
                &self.application_id.as_ref().map(Redact::from),
            )
            .field(
                "application_key",
                &self.application_key.as_deref().map(Redact::secret),
            )
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .field("utf8_identifiers", &self.utf8_identifiers)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept. Values that can't be parsed are
    /// skipped with a warning.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(SECUREAUTH_HOST) {
            self.host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SECUREAUTH_PORT) {
            self.port.get_or_insert(v);
        }
        if let Some(v) = env_bool(ctx, SECUREAUTH_USE_TLS) {
            self.use_tls.get_or_insert(v);
        }
        if let Some(v) = env_bool(ctx, SECUREAUTH_TRUST_SELF_SIGNED) {
            self.trust_self_signed.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SECUREAUTH_REALM) {
            self.realm.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SECUREAUTH_APPLICATION_ID) {
            self.application_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SECUREAUTH_APPLICATION_KEY) {
            self.application_key.get_or_insert(v);
        }
        if let Some(v) = env_secs(ctx, SECUREAUTH_CONNECT_TIMEOUT) {
            self.connect_timeout.get_or_insert(v);
        }
        if let Some(v) = env_secs(ctx, SECUREAUTH_TIMEOUT) {
            self.timeout.get_or_insert(v);
        }
        if let Some(v) = env_bool(ctx, SECUREAUTH_UTF8_IDENTIFIERS) {
            self.utf8_identifiers.get_or_insert(v);
        }

        self
    }

    /// Build the immutable credential out of this config.
    pub fn to_credential(&self) -> Result<Credential> {
        let host = self
            .host
            .as_deref()
            .ok_or_else(|| Error::config_invalid("host is required"))?;
        let port = self
            .port
            .as_deref()
            .ok_or_else(|| Error::config_invalid("port is required"))?;
        let realm = self
            .realm
            .as_deref()
            .ok_or_else(|| Error::config_invalid("realm is required"))?;
        let application_id = self
            .application_id
            .as_deref()
            .ok_or_else(|| Error::config_invalid("application id is required"))?;
        let application_key = self
            .application_key
            .as_deref()
            .ok_or_else(|| Error::config_invalid("application key is required"))?;

        let cred = Credential::new(
            host,
            port,
            self.use_tls.unwrap_or(true),
            realm,
            application_id,
            application_key,
        )?;
        Ok(cred.with_trust_self_signed(self.trust_self_signed.unwrap_or_default()))
    }

    /// Encoding applied to identifiers embedded in resource paths.
    pub fn identifier_encoding(&self) -> IdentifierEncoding {
        if self.utf8_identifiers.unwrap_or_default() {
            IdentifierEncoding::Utf8
        } else {
            IdentifierEncoding::Legacy
        }
    }
}

fn env_bool(ctx: &Context, key: &str) -> Option<bool> {
    let v = ctx.env_var(key)?;
    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => {
            warn!("ignoring env {key}: {v:?} is not a boolean");
            None
        }
    }
}

fn env_secs(ctx: &Context, key: &str) -> Option<Duration> {
    let v = ctx.env_var(key)?;
    match v.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            warn!("ignoring env {key}: {v:?} is not a number of seconds");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    fn ctx(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_from_env() {
        let ctx = ctx(&[
            (SECUREAUTH_HOST, "sa.example.com"),
            (SECUREAUTH_PORT, "8443"),
            (SECUREAUTH_USE_TLS, "on"),
            (SECUREAUTH_TRUST_SELF_SIGNED, "1"),
            (SECUREAUTH_REALM, "secureauth1"),
            (SECUREAUTH_APPLICATION_ID, "app-id"),
            (SECUREAUTH_APPLICATION_KEY, "app-key"),
            (SECUREAUTH_CONNECT_TIMEOUT, "3"),
            (SECUREAUTH_TIMEOUT, "not-a-number"),
        ]);

        let cfg = Config::default().from_env(&ctx);
        assert_eq!(cfg.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(cfg.timeout, None);
        assert_eq!(cfg.identifier_encoding(), IdentifierEncoding::Legacy);

        let cred = cfg.to_credential().unwrap();
        assert_eq!(cred.appliance_url(), "https://sa.example.com:8443");
        assert!(cred.base_url().trust_self_signed());
        assert_eq!(cred.realm(), "secureauth1");
        assert_eq!(cred.application_id(), "app-id");
    }

    #[test]
    fn test_fields_win_over_env() {
        let ctx = ctx(&[
            (SECUREAUTH_HOST, "env.example.com"),
            (SECUREAUTH_USE_TLS, "true"),
            (SECUREAUTH_UTF8_IDENTIFIERS, "yes"),
        ]);

        let cfg = Config {
            host: Some("field.example.com".to_string()),
            use_tls: Some(false),
            ..Default::default()
        }
        .from_env(&ctx);

        assert_eq!(cfg.host.as_deref(), Some("field.example.com"));
        assert_eq!(cfg.use_tls, Some(false));
        assert_eq!(cfg.identifier_encoding(), IdentifierEncoding::Utf8);
    }

    #[test]
    fn test_missing_fields_fail_fast() {
        let cfg = Config {
            host: Some("h".to_string()),
            port: Some("443".to_string()),
            realm: Some("r".to_string()),
            application_id: Some("i".to_string()),
            ..Default::default()
        };
        let err = cfg.to_credential().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_debug_never_shows_key() {
        let cfg = Config {
            application_key: Some("super-secret-application-key".to_string()),
            ..Default::default()
        };
        assert!(!format!("{cfg:?}").contains("super-secret"));
    }
}
