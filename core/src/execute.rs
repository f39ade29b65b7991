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

use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, DATE};
use http::HeaderValue;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{AuthorizationToken, Context, Error, Result, SigningMethod};

const APPLICATION_JSON: &str = "application/json";

/// Serialize a request payload into the exact text that is signed and sent.
///
/// Fields are written in declaration order, so the same value always produces
/// the same body.
pub fn json_body<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    serde_json::to_string(payload)
        .map_err(|e| Error::request_invalid("failed to serialize request body").with_source(e))
}

/// Executor sends signed requests and decodes typed responses.
///
/// It keeps nothing between calls besides the transport in its [`Context`], so
/// a single executor can be shared by concurrent tasks. Every call is a single
/// attempt, nothing is retried.
#[derive(Debug, Clone)]
pub struct Executor {
    ctx: Context,
}

impl Executor {
    /// Create an executor over the transport of `ctx`.
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Send a signed request to `url` and decode the response as `T`.
    ///
    /// `body` must be the very text that was signed into `token`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: SigningMethod,
        url: &str,
        token: &AuthorizationToken,
        body: Option<String>,
    ) -> Result<T> {
        let req = build_request(method, url, token, body)?;

        debug!("sending {} {}", method.as_str(), url);
        let resp = self.ctx.http_send(req).await?;

        let (parts, body) = resp.into_parts();
        debug!("got response {} with {} bytes", parts.status, body.len());

        match serde_json::from_slice::<T>(&body) {
            Ok(v) => Ok(v),
            Err(e) if parts.status.is_success() => Err(Error::response_shape(
                "response body doesn't match the expected shape",
            )
            .with_source(e)),
            Err(e) => Err(Error::response_shape(format!(
                "appliance responded {} with an unexpected body: {}",
                parts.status,
                String::from_utf8_lossy(&body)
            ))
            .with_source(e)),
        }
    }
}

fn build_request(
    method: SigningMethod,
    url: &str,
    token: &AuthorizationToken,
    body: Option<String>,
) -> Result<http::Request<Bytes>> {
    let mut builder = http::Request::builder()
        .method(http::Method::from(method))
        .uri(url)
        .header(DATE, token.timestamp())
        .header(ACCEPT, APPLICATION_JSON)
        .header(AUTHORIZATION, {
            let mut value = HeaderValue::from_str(token.as_str())?;
            value.set_sensitive(true);

            value
        });

    let body = match body {
        Some(body) => {
            builder = builder.header(CONTENT_TYPE, APPLICATION_JSON);
            Bytes::from(body)
        }
        None => Bytes::new(),
    };

    Ok(builder.body(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Credential, ErrorKind, HttpSend, RequestSigner};
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Status {
        status: String,
        message: String,
    }

    #[derive(Debug, Serialize)]
    struct Payload {
        user_id: String,
        #[serde(rename = "type")]
        kind: String,
    }

    /// Records requests and answers them with the next canned result.
    #[derive(Debug, Clone, Default)]
    struct MockHttpSend {
        requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
        responses: Arc<Mutex<Vec<Result<(u16, &'static str)>>>>,
    }

    impl MockHttpSend {
        fn respond(self, r: Result<(u16, &'static str)>) -> Self {
            self.responses.lock().unwrap().push(r);
            self
        }
    }

    #[async_trait::async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.requests.lock().unwrap().push(req);
            let (status, body) = self.responses.lock().unwrap().remove(0)?;
            Ok(http::Response::builder()
                .status(status)
                .body(Bytes::from_static(body.as_bytes()))?)
        }
    }

    fn credential() -> Credential {
        Credential::new("sa.example.com", "443", true, "secureauth1", "app", "key").unwrap()
    }

    #[tokio::test]
    async fn test_execute_post() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let http = MockHttpSend::default().respond(Ok((200, r#"{"status":"found","message":""}"#)));
        let executor = Executor::new(Context::new().with_http_send(http.clone()));

        let cred = credential();
        let body = json_body(&Payload {
            user_id: "jdoe".to_string(),
            kind: "user_id".to_string(),
        })?;
        let path = "/secureauth1/api/v1/auth";
        let token =
            RequestSigner::new().sign_request(&cred, SigningMethod::Post, path, Some(&body))?;

        let resp: Status = executor
            .execute(
                SigningMethod::Post,
                &format!("{}{path}", cred.appliance_url()),
                &token,
                Some(body.clone()),
            )
            .await?;
        assert_eq!(
            resp,
            Status {
                status: "found".to_string(),
                message: "".to_string()
            }
        );

        let requests = http.requests.lock().unwrap();
        let req = &requests[0];
        assert_eq!(req.method(), http::Method::POST);
        assert_eq!(
            req.uri().to_string(),
            "https://sa.example.com:443/secureauth1/api/v1/auth"
        );
        assert_eq!(req.headers()[AUTHORIZATION], token.as_str());
        assert!(req.headers()[AUTHORIZATION].is_sensitive());
        assert_eq!(req.headers()[DATE], token.timestamp());
        assert_eq!(req.headers()[CONTENT_TYPE], APPLICATION_JSON);
        assert_eq!(req.body().as_ref(), br#"{"user_id":"jdoe","type":"user_id"}"#);
        Ok(())
    }

    #[tokio::test]
    async fn test_execute_get_has_no_body() -> anyhow::Result<()> {
        let http =
            MockHttpSend::default().respond(Ok((200, r#"{"status":"found","message":"ok"}"#)));
        let executor = Executor::new(Context::new().with_http_send(http.clone()));

        let cred = credential();
        let token = RequestSigner::new().sign_request(&cred, SigningMethod::Get, "/p", None)?;
        let _: Status = executor
            .execute(SigningMethod::Get, "https://sa.example.com:443/p", &token, None)
            .await?;

        let requests = http.requests.lock().unwrap();
        assert!(requests[0].body().is_empty());
        assert!(requests[0].headers().get(CONTENT_TYPE).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_is_shape_error() -> anyhow::Result<()> {
        let http = MockHttpSend::default()
            .respond(Ok((200, "<html>maintenance</html>")))
            .respond(Ok((200, r#"{"status":404}"#)))
            .respond(Ok((500, "internal error")));
        let executor = Executor::new(Context::new().with_http_send(http));

        let token =
            RequestSigner::new().sign_request(&credential(), SigningMethod::Get, "/p", None)?;
        for _ in 0..3 {
            let err = executor
                .execute::<Status>(SigningMethod::Get, "https://sa.example.com:443/p", &token, None)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ResponseShape);
            assert!(!err.is_retryable());
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_error_status_with_known_shape_is_returned() -> anyhow::Result<()> {
        let http = MockHttpSend::default()
            .respond(Ok((401, r#"{"status":"invalid","message":"Invalid signature"}"#)));
        let executor = Executor::new(Context::new().with_http_send(http));

        let token =
            RequestSigner::new().sign_request(&credential(), SigningMethod::Get, "/p", None)?;
        let resp: Status = executor
            .execute(SigningMethod::Get, "https://sa.example.com:443/p", &token, None)
            .await?;
        assert_eq!(resp.status, "invalid");
        assert_eq!(resp.message, "Invalid signature");
        Ok(())
    }

    #[tokio::test]
    async fn test_transport_error_leaves_executor_reusable() -> anyhow::Result<()> {
        let http = MockHttpSend::default()
            .respond(Err(Error::transport("operation timed out")))
            .respond(Ok((200, r#"{"status":"found","message":""}"#)));
        let executor = Executor::new(Context::new().with_http_send(http));
        let cred = credential();
        let signer = RequestSigner::new();

        let token = signer.sign_request(&cred, SigningMethod::Get, "/p", None)?;
        let err = executor
            .execute::<Status>(SigningMethod::Get, "https://sa.example.com:443/p", &token, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.is_retryable());

        let token = signer.sign_request(&cred, SigningMethod::Get, "/p", None)?;
        let resp: Status = executor
            .execute(SigningMethod::Get, "https://sa.example.com:443/p", &token, None)
            .await?;
        assert_eq!(resp.status, "found");
        Ok(())
    }

    #[tokio::test]
    async fn test_no_transport_configured() -> anyhow::Result<()> {
        let executor = Executor::new(Context::new());
        let token =
            RequestSigner::new().sign_request(&credential(), SigningMethod::Get, "/p", None)?;
        let err = executor
            .execute::<Status>(SigningMethod::Get, "https://sa.example.com:443/p", &token, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        Ok(())
    }

    #[test]
    fn test_invalid_url_is_request_error() {
        let token = RequestSigner::new()
            .sign_request(&credential(), SigningMethod::Get, "/p", None)
            .unwrap();
        let err = build_request(SigningMethod::Get, "not a url", &token, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
