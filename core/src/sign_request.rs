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

//! Request signing for the SecureAuth appliance.
use std::fmt::{Debug, Formatter, Write};
use std::str::FromStr;

use log::debug;

use crate::hash::base64_hmac_sha256;
use crate::time::{format_http_date, now, DateTime};
use crate::utils::Redact;
use crate::{Credential, Error, Result};

/// SigningMethod is the http method a request is signed for.
///
/// The appliance only accepts `GET`, `POST` and `PUT`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SigningMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
}

impl SigningMethod {
    /// The upper-case verb used in the string to sign.
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningMethod::Get => "GET",
            SigningMethod::Post => "POST",
            SigningMethod::Put => "PUT",
        }
    }
}

impl FromStr for SigningMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(SigningMethod::Get),
            "POST" => Ok(SigningMethod::Post),
            "PUT" => Ok(SigningMethod::Put),
            v => Err(Error::request_invalid(format!(
                "method {v:?} is not supported for signing"
            ))),
        }
    }
}

impl TryFrom<&http::Method> for SigningMethod {
    type Error = Error;

    fn try_from(m: &http::Method) -> Result<Self> {
        m.as_str().parse()
    }
}

impl From<SigningMethod> for http::Method {
    fn from(m: SigningMethod) -> Self {
        match m {
            SigningMethod::Get => http::Method::GET,
            SigningMethod::Post => http::Method::POST,
            SigningMethod::Put => http::Method::PUT,
        }
    }
}

/// SigningRequest carries everything that is bound into a signature.
#[derive(Debug, Clone, Copy)]
pub struct SigningRequest<'a> {
    /// HTTP method.
    pub method: SigningMethod,
    /// Realm scoped resource path, exactly as it's dispatched.
    pub path: &'a str,
    /// Serialized body, `None` for requests without body.
    pub body: Option<&'a str>,
    /// Timestamp in http date format, also sent as `Date` header.
    pub timestamp: &'a str,
}

impl SigningRequest<'_> {
    /// Construct string to sign
    ///
    /// ## Format
    ///
    /// ```text
    /// VERB + "\n" +
    /// ResourcePath + "\n" +
    /// Body + "\n" +
    /// Timestamp
    /// ```
    ///
    /// A missing body is signed as an empty string, so a bodyless request
    /// signs the same as one carrying an empty body.
    pub fn string_to_sign(&self) -> Result<String> {
        let body = self.body.unwrap_or_default();

        let mut s = String::with_capacity(
            self.path.len() + body.len() + self.timestamp.len() + 8,
        );
        writeln!(&mut s, "{}", self.method.as_str())?;
        writeln!(&mut s, "{}", self.path)?;
        writeln!(&mut s, "{body}")?;
        write!(&mut s, "{}", self.timestamp)?;

        Ok(s)
    }
}

/// AuthorizationToken is the value of the `Authorization` header of one request.
///
/// ```text
/// realm:application_id:timestamp:base64(hmac_sha256(application_key, string_to_sign))
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationToken {
    value: String,
    timestamp: String,
}

impl AuthorizationToken {
    /// The full header value.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The timestamp bound into this token, to be sent as `Date` header.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl Debug for AuthorizationToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationToken")
            .field("value", &Redact::from(&self.value))
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

/// Sign a request with the given credential.
///
/// This is a pure function: the same credential and request always yield the
/// same token.
pub fn sign(cred: &Credential, req: &SigningRequest<'_>) -> Result<AuthorizationToken> {
    let key = cred.application_key();
    if key.is_empty() {
        return Err(Error::request_invalid(
            "refusing to sign with an empty application key",
        ));
    }

    let string_to_sign = req.string_to_sign()?;
    debug!("string to sign: {:?}", &string_to_sign);

    let signature = base64_hmac_sha256(key.as_bytes(), string_to_sign.as_bytes());

    Ok(AuthorizationToken {
        value: format!(
            "{}:{}:{}:{}",
            cred.realm(),
            cred.application_id(),
            req.timestamp,
            signature
        ),
        timestamp: req.timestamp.to_string(),
    })
}

/// RequestSigner signs requests with a fresh timestamp every time.
#[derive(Debug, Default, Clone)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests, the appliance
    /// rejects timestamps outside of its replay window.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign a request for `path` with the current time.
    pub fn sign_request(
        &self,
        cred: &Credential,
        method: SigningMethod,
        path: &str,
        body: Option<&str>,
    ) -> Result<AuthorizationToken> {
        let timestamp = format_http_date(self.time.unwrap_or_else(now));

        sign(
            cred,
            &SigningRequest {
                method,
                path,
                body,
                timestamp: &timestamp,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_http_date;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    const TIMESTAMP: &str = "Wed, 04 Oct 2023 12:00:00 GMT";

    fn credential(key: &str) -> Credential {
        Credential::new("sa.example.com", "443", true, "acme", "app", key).unwrap()
    }

    fn request<'a>(
        method: SigningMethod,
        path: &'a str,
        body: Option<&'a str>,
    ) -> SigningRequest<'a> {
        SigningRequest {
            method,
            path,
            body,
            timestamp: TIMESTAMP,
        }
    }

    #[test]
    fn test_string_to_sign() {
        let req = request(SigningMethod::Post, "/acme/api/v1/auth", Some("{\"a\":1}"));
        assert_eq!(
            req.string_to_sign().unwrap(),
            "POST\n/acme/api/v1/auth\n{\"a\":1}\nWed, 04 Oct 2023 12:00:00 GMT"
        );

        let req = request(SigningMethod::Get, "/acme/api/v1/dfp/js", None);
        assert_eq!(
            req.string_to_sign().unwrap(),
            "GET\n/acme/api/v1/dfp/js\n\nWed, 04 Oct 2023 12:00:00 GMT"
        );
    }

    #[test]
    fn test_sign_fixed_token() {
        let req = request(SigningMethod::Get, "/identity/acme/auth/abc123", Some(""));

        let t1 = sign(&credential("K1"), &req).unwrap();
        assert_eq!(
            t1.as_str(),
            "acme:app:Wed, 04 Oct 2023 12:00:00 GMT:IRazEP25rw7anULQXoJaSAEeuZdK963/oqrGJrDRL4s="
        );
        assert_eq!(t1.timestamp(), TIMESTAMP);

        let t2 = sign(&credential("K2"), &req).unwrap();
        assert_eq!(
            t2.as_str(),
            "acme:app:Wed, 04 Oct 2023 12:00:00 GMT:xfiSrkhEnB4L6aIEWEoH8mtDVyov8OFXs1hkE002arc="
        );
    }

    #[test]
    fn test_sign_with_body() {
        let cred = Credential::new("h", "443", true, "secureauth1", "app", "K1").unwrap();
        let req = request(
            SigningMethod::Post,
            "/secureauth1/api/v1/auth",
            Some(r#"{"user_id":"jdoe","type":"user_id"}"#),
        );
        let token = sign(&cred, &req).unwrap();
        assert_eq!(token.timestamp(), TIMESTAMP);
        assert_eq!(
            token.as_str().rsplit(':').next(),
            Some("KNB3x0enuQpqbzYWottTArVO0QwHOSz4yzyJThV6dCM=")
        );
        assert!(token.as_str().starts_with("secureauth1:app:"));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let cred = credential("K1");
        let req = request(SigningMethod::Put, "/acme/api/v1/behavebio", Some("{}"));

        let tokens: Vec<_> = (0..8).map(|_| sign(&cred, &req).unwrap()).collect();
        assert!(tokens.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_sign_is_sensitive_to_every_input() {
        let cred = credential("K1");
        let base = request(SigningMethod::Post, "/acme/api/v1/auth", Some("{\"a\":1}"));
        let expected = sign(&cred, &base).unwrap();

        let cases = vec![
            (
                "method",
                cred.clone(),
                SigningRequest {
                    method: SigningMethod::Put,
                    ..base
                },
            ),
            (
                "path",
                cred.clone(),
                SigningRequest {
                    path: "/acme/api/v1/autH",
                    ..base
                },
            ),
            (
                "body",
                cred.clone(),
                SigningRequest {
                    body: Some("{\"a\":2}"),
                    ..base
                },
            ),
            (
                "timestamp",
                cred.clone(),
                SigningRequest {
                    timestamp: "Wed, 04 Oct 2023 12:00:01 GMT",
                    ..base
                },
            ),
            ("key", credential("K2"), base),
        ];

        for (name, cred, req) in cases {
            let token = sign(&cred, &req).unwrap();
            assert_ne!(token, expected, "changing {name} must change the token");
        }
    }

    #[test]
    fn test_empty_body_signs_like_missing_body() {
        let cred = credential("K1");
        let get = sign(&cred, &request(SigningMethod::Get, "/p", None)).unwrap();
        let post_empty = sign(&cred, &request(SigningMethod::Post, "/p", Some(""))).unwrap();
        let post_missing = sign(&cred, &request(SigningMethod::Post, "/p", None)).unwrap();
        let post_body = sign(&cred, &request(SigningMethod::Post, "/p", Some("{}"))).unwrap();

        let signature = |t: &AuthorizationToken| t.as_str().rsplit(':').next().unwrap().to_string();

        assert_eq!(post_empty, post_missing);
        assert_ne!(signature(&post_empty), signature(&post_body));
        // Only the verb differs between these two.
        assert_ne!(signature(&get), signature(&post_empty));
        assert_eq!(
            &request(SigningMethod::Get, "/p", None).string_to_sign().unwrap()[3..],
            &request(SigningMethod::Post, "/p", Some("")).string_to_sign().unwrap()[4..]
        );
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let cred = credential("K1").without_key();
        let err = sign(&cred, &request(SigningMethod::Get, "/p", None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_unsupported_method_is_rejected() {
        for m in ["DELETE", "PATCH", "get", ""] {
            let err = m.parse::<SigningMethod>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::RequestInvalid, "method {m:?}");
        }
        assert_eq!(
            SigningMethod::try_from(&http::Method::PUT).unwrap(),
            SigningMethod::Put
        );
        assert!(SigningMethod::try_from(&http::Method::DELETE).is_err());
    }

    #[test]
    fn test_request_signer_uses_fresh_timestamp() {
        let cred = credential("K1");
        let token = RequestSigner::new()
            .sign_request(&cred, SigningMethod::Get, "/p", None)
            .unwrap();

        let ts = parse_http_date(token.timestamp()).unwrap();
        assert!((now() - ts).num_seconds().abs() < 5);
        assert!(token.as_str().starts_with("acme:app:"));
        assert!(token.as_str().contains(token.timestamp()));
    }

    #[test]
    fn test_request_signer_with_time() {
        let t = parse_http_date(TIMESTAMP).unwrap();
        let token = RequestSigner::new()
            .with_time(t)
            .sign_request(&credential("K1"), SigningMethod::Get, "/identity/acme/auth/abc123", None)
            .unwrap();
        assert_eq!(
            token.as_str(),
            "acme:app:Wed, 04 Oct 2023 12:00:00 GMT:IRazEP25rw7anULQXoJaSAEeuZdK963/oqrGJrDRL4s="
        );
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = sign(
            &credential("K1"),
            &request(SigningMethod::Get, "/identity/acme/auth/abc123", None),
        )
        .unwrap();
        assert!(!format!("{token:?}").contains("IRazEP25rw7anULQXoJaSAEeuZdK963"));
    }
}
