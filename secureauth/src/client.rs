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

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;

use secureauth_core::{
    json_body, wire_path, Config, Context, Credential, Error, Executor, IdentifierEncoding,
    OsEnv, RequestSigner, Result, SigningMethod,
};

use crate::context::default_context;
use crate::paths::Paths;
use crate::requests::*;
use crate::responses::*;

/// Client talks to one realm of a SecureAuth appliance.
///
/// Every operation signs a fresh request, sends it once and returns the typed
/// response. Failures are logged and returned, nothing is retried. The client
/// is cheap to clone and can be shared by concurrent tasks.
#[derive(Debug, Clone)]
pub struct Client {
    credential: Credential,
    paths: Paths,
    signer: RequestSigner,
    executor: Executor,
}

impl Client {
    /// Create a client sending through the transport of `ctx`.
    ///
    /// Identifiers are escaped with [`IdentifierEncoding::Legacy`].
    pub fn new(credential: Credential, ctx: Context) -> Self {
        Self {
            paths: Paths::new(credential.realm(), IdentifierEncoding::default()),
            credential,
            signer: RequestSigner::new(),
            executor: Executor::new(ctx),
        }
    }

    /// Create a client with a pooled reqwest transport built from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credential = config.to_credential()?;
        let ctx = default_context(config)?;

        Ok(Self::new(credential, ctx).with_identifier_encoding(config.identifier_encoding()))
    }

    /// Create a client from `SECUREAUTH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let config = Config::default().from_env(&Context::new().with_env(OsEnv));
        Self::from_config(&config)
    }

    /// Choose how identifiers are escaped in resource paths.
    pub fn with_identifier_encoding(mut self, encoding: IdentifierEncoding) -> Self {
        self.paths = Paths::new(self.credential.realm(), encoding);
        self
    }

    /// Replace the request signer.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Credential the client signs with.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Evaluate the risk of `ip_address` for `user_id`.
    pub async fn ip_evaluation(&self, user_id: &str, ip_address: &str) -> Result<IpEvalResponse> {
        let req = IpEvalRequest {
            user_id: user_id.to_string(),
            ip_address: ip_address.to_string(),
            kind: "risk".to_string(),
        };
        self.post("ip_evaluation", self.paths.ip_eval(), &req).await
    }

    /// List the authentication factors of `user_id`.
    pub async fn factors_by_user(&self, user_id: &str) -> Result<FactorsResponse> {
        self.get("factors_by_user", self.paths.factors(user_id)).await
    }

    /// Send a push-to-accept notification to the device behind `factor_id`.
    ///
    /// The returned `reference_id` is polled with [`Client::push_accept_status`].
    pub async fn send_push_to_accept(
        &self,
        user_id: &str,
        factor_id: &str,
        end_user_ip: &str,
        company_name: Option<&str>,
        application_description: Option<&str>,
    ) -> Result<ResponseObject> {
        let req = AuthRequest {
            push_accept_details: Some(PushAcceptDetails {
                enduser_ip: end_user_ip.to_string(),
                company_name: company_name.map(str::to_string),
                application_description: application_description.map(str::to_string),
            }),
            ..AuthRequest::new(user_id, "push_accept").with_factor_id(factor_id)
        };
        self.post("send_push_to_accept", self.paths.auth(), &req).await
    }

    /// Ask the realm's adaptive authentication workflow about a login.
    pub async fn adaptive_auth(
        &self,
        user_id: &str,
        end_user_ip: &str,
    ) -> Result<AdaptiveAuthResponse> {
        let req = AdaptiveAuthRequest {
            user_id: user_id.to_string(),
            ip_address: end_user_ip.to_string(),
        };
        self.post("adaptive_auth", self.paths.adaptive_auth(), &req).await
    }

    /// Poll the decision on a push-to-accept request.
    pub async fn push_accept_status(&self, reference_id: &str) -> Result<PushAcceptStatus> {
        self.get("push_accept_status", self.paths.auth_status(reference_id)).await
    }

    /// Check that `user_id` exists.
    pub async fn validate_user(&self, user_id: &str) -> Result<BaseResponse> {
        let req = AuthRequest::new(user_id, "user_id");
        self.post("validate_user", self.paths.auth(), &req).await
    }

    /// Check the password of `user_id`.
    pub async fn validate_user_password(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<BaseResponse> {
        let req = AuthRequest::new(user_id, "password").with_token(password);
        self.post("validate_user_password", self.paths.auth(), &req).await
    }

    /// Check the pin of `user_id`.
    pub async fn validate_user_pin(&self, user_id: &str, pin: &str) -> Result<BaseResponse> {
        let req = AuthRequest::new(user_id, "pin").with_token(pin);
        self.post("validate_user_pin", self.paths.auth(), &req).await
    }

    /// Check the answer to the knowledge based question `factor_id`.
    pub async fn validate_kba(
        &self,
        user_id: &str,
        answer: &str,
        factor_id: &str,
    ) -> Result<BaseResponse> {
        let req = AuthRequest::new(user_id, "kba")
            .with_token(answer)
            .with_factor_id(factor_id);
        self.post("validate_kba", self.paths.auth(), &req).await
    }

    /// Check an oath one time password generated by `factor_id`.
    pub async fn validate_oath(
        &self,
        user_id: &str,
        otp: &str,
        factor_id: &str,
    ) -> Result<BaseResponse> {
        let req = AuthRequest::new(user_id, "oath")
            .with_token(otp)
            .with_factor_id(factor_id);
        self.post("validate_oath", self.paths.auth(), &req).await
    }

    /// Deliver a one time password with a phone call.
    pub async fn deliver_otp_by_phone(
        &self,
        user_id: &str,
        factor_id: &str,
    ) -> Result<ResponseObject> {
        self.deliver_otp("deliver_otp_by_phone", user_id, factor_id, "call").await
    }

    /// Deliver a one time password by sms.
    pub async fn deliver_otp_by_sms(
        &self,
        user_id: &str,
        factor_id: &str,
    ) -> Result<ResponseObject> {
        self.deliver_otp("deliver_otp_by_sms", user_id, factor_id, "sms").await
    }

    /// Deliver a one time password by email.
    pub async fn deliver_otp_by_email(
        &self,
        user_id: &str,
        factor_id: &str,
    ) -> Result<ResponseObject> {
        self.deliver_otp("deliver_otp_by_email", user_id, factor_id, "email").await
    }

    /// Deliver a one time password with a push notification.
    pub async fn deliver_otp_by_push(
        &self,
        user_id: &str,
        factor_id: &str,
    ) -> Result<ResponseObject> {
        self.deliver_otp("deliver_otp_by_push", user_id, factor_id, "push").await
    }

    /// Deliver a one time password through the help desk.
    pub async fn deliver_otp_by_help_desk(
        &self,
        user_id: &str,
        factor_id: &str,
    ) -> Result<ResponseObject> {
        self.deliver_otp("deliver_otp_by_help_desk", user_id, factor_id, "help_desk").await
    }

    async fn deliver_otp(
        &self,
        op: &str,
        user_id: &str,
        factor_id: &str,
        kind: &str,
    ) -> Result<ResponseObject> {
        let req = AuthRequest::new(user_id, kind).with_factor_id(factor_id);
        self.post(op, self.paths.auth(), &req).await
    }

    /// Record an access of `user_id` from `ip_address`.
    pub async fn access_history(&self, user_id: &str, ip_address: &str) -> Result<ResponseObject> {
        let req = AccessHistoryRequest {
            user_id: user_id.to_string(),
            ip_address: ip_address.to_string(),
        };
        self.post("access_history", self.paths.access_history(), &req).await
    }

    /// Confirm the device fingerprint `fingerprint_id` for `user_id`.
    pub async fn dfp_confirm(
        &self,
        user_id: &str,
        fingerprint_id: &str,
    ) -> Result<DfpConfirmResponse> {
        let req = DfpConfirmRequest {
            user_id: user_id.to_string(),
            fingerprint_id: fingerprint_id.to_string(),
        };
        self.post("dfp_confirm", self.paths.dfp_confirm(), &req).await
    }

    /// Validate a device fingerprint collected in the browser.
    ///
    /// `fingerprint_json` is the payload produced by the script from
    /// [`Client::javascript_src`]. The browser's accept headers are filled in
    /// from the other arguments.
    #[allow(clippy::too_many_arguments)]
    pub async fn dfp_validate(
        &self,
        user_id: &str,
        host_address: &str,
        fingerprint_json: &str,
        accept: &str,
        accept_charset: &str,
        accept_encoding: &str,
        accept_language: &str,
    ) -> Result<DfpValidateResponse> {
        let mut req: DfpValidateRequest = serde_json::from_str(fingerprint_json).map_err(|e| {
            let err = Error::request_invalid("fingerprint is not valid json").with_source(e);
            error!("dfp_validate failed: {err}");
            err
        })?;
        req.user_id = user_id.to_string();
        req.host_address = host_address.to_string();
        req.fingerprint.accept = accept.to_string();
        req.fingerprint.accept_charset = accept_charset.to_string();
        req.fingerprint.accept_encoding = accept_encoding.to_string();
        req.fingerprint.accept_language = accept_language.to_string();

        self.post("dfp_validate", self.paths.dfp_validate(), &req).await
    }

    /// Location of the device fingerprinting script.
    pub async fn javascript_src(&self) -> Result<JsObjectResponse> {
        self.get("javascript_src", self.paths.dfp_js()).await
    }

    /// Location of the behavioral biometrics script.
    pub async fn behave_bio_js_src(&self) -> Result<JsObjectResponse> {
        self.get("behave_bio_js_src", self.paths.behave_bio_js()).await
    }

    /// Submit a behavioral biometrics profile for scoring.
    pub async fn behave_bio_profile_submit(
        &self,
        user_id: &str,
        behavior_profile: &str,
        host_address: &str,
        user_agent: &str,
    ) -> Result<BehaveBioResponse> {
        let req = BehaveBioRequest {
            user_id: user_id.to_string(),
            behavior_profile: behavior_profile.to_string(),
            host_address: host_address.to_string(),
            user_agent: user_agent.to_string(),
        };
        self.post("behave_bio_profile_submit", self.paths.behave_bio(), &req).await
    }

    /// Reset one field of a behavioral biometrics profile.
    pub async fn behave_bio_profile_reset(
        &self,
        user_id: &str,
        field_name: &str,
        field_type: &str,
        device_type: &str,
    ) -> Result<ResponseObject> {
        let req = BehaveBioResetRequest {
            user_id: user_id.to_string(),
            field_name: field_name.to_string(),
            field_type: field_type.to_string(),
            device_type: device_type.to_string(),
        };
        self.put("behave_bio_profile_reset", self.paths.behave_bio(), &req).await
    }

    /// Create a user.
    ///
    /// The profile must carry a user id and a password, otherwise the call
    /// fails with [`secureauth_core::ErrorKind::RequestInvalid`] before
    /// anything is sent.
    pub async fn create_user(&self, profile: &NewUserProfile) -> Result<ResponseObject> {
        let has_user_id = profile.user_id.as_deref().is_some_and(|v| !v.is_empty());
        let has_password = profile.password.as_deref().is_some_and(|v| !v.is_empty());
        if !has_user_id || !has_password {
            let err = Error::request_invalid("creating a user requires a user id and a password");
            error!("create_user failed: {err}");
            return Err(err);
        }

        self.post("create_user", self.paths.users(), profile).await
    }

    /// Update the profile of `user_id`, unset fields are left untouched.
    pub async fn update_user(
        &self,
        user_id: &str,
        profile: &NewUserProfile,
    ) -> Result<ResponseObject> {
        self.put("update_user", self.paths.user(user_id), profile).await
    }

    /// Read the profile of `user_id`.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<UserProfileResponse> {
        self.get("get_user_profile", self.paths.user(user_id)).await
    }

    /// Add `user_id` to `group_name`.
    pub async fn add_user_to_group(
        &self,
        user_id: &str,
        group_name: &str,
    ) -> Result<ResponseObject> {
        let path = self.paths.user_group(user_id, group_name);
        self.execute("add_user_to_group", SigningMethod::Post, path, None).await
    }

    /// Add several users to `group_name`.
    pub async fn add_users_to_group(
        &self,
        users: &UsersToGroup,
        group_name: &str,
    ) -> Result<GroupAssociationResponse> {
        self.post("add_users_to_group", self.paths.group_users(group_name), users).await
    }

    /// Add `group_name` to `user_id`, seen from the group.
    pub async fn add_group_to_user(
        &self,
        group_name: &str,
        user_id: &str,
    ) -> Result<GroupAssociationResponse> {
        let path = self.paths.group_user(group_name, user_id);
        self.execute("add_group_to_user", SigningMethod::Post, path, None).await
    }

    /// Add `user_id` to several groups.
    pub async fn add_user_to_groups(
        &self,
        user_id: &str,
        groups: &UserToGroups,
    ) -> Result<GroupAssociationResponse> {
        self.post("add_user_to_groups", self.paths.user_groups(user_id), groups).await
    }

    /// Set a new password for `user_id` as an administrator.
    pub async fn password_reset(&self, user_id: &str, password: &str) -> Result<ResponseObject> {
        let req = UserPasswordRequest {
            password: Some(password.to_string()),
            ..Default::default()
        };
        self.post(
            "password_reset",
            self.paths.user_reset_password(user_id),
            &req,
        )
        .await
    }

    /// Change the password of `user_id`, proving the current one.
    pub async fn password_change(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<ResponseObject> {
        let req = UserPasswordRequest {
            current_password: Some(current_password.to_string()),
            new_password: Some(new_password.to_string()),
            ..Default::default()
        };
        self.post(
            "password_change",
            self.paths.user_change_password(user_id),
            &req,
        )
        .await
    }

    async fn get<T: DeserializeOwned>(&self, op: &str, path: String) -> Result<T> {
        self.execute(op, SigningMethod::Get, path, None).await
    }

    async fn post<B, T>(&self, op: &str, path: String, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(op, SigningMethod::Post, path, payload).await
    }

    async fn put<B, T>(&self, op: &str, path: String, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(op, SigningMethod::Put, path, payload).await
    }

    async fn send_json<B, T>(
        &self,
        op: &str,
        method: SigningMethod,
        path: String,
        payload: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = match json_body(payload) {
            Ok(v) => v,
            Err(err) => {
                error!("{op} failed: {err}");
                return Err(err);
            }
        };
        self.execute(op, method, path, Some(body)).await
    }

    /// Sign and send one request, `body` is sent exactly as it was signed.
    async fn execute<T: DeserializeOwned>(
        &self,
        op: &str,
        method: SigningMethod,
        path: String,
        body: Option<String>,
    ) -> Result<T> {
        debug!("{op}: {} {path}", method.as_str());

        let result = self.sign_and_send(method, &path, body).await;
        if let Err(err) = &result {
            error!("{op} failed: {err}");
        }
        result
    }

    async fn sign_and_send<T: DeserializeOwned>(
        &self,
        method: SigningMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<T> {
        // Sign the path in the form the transport will dispatch it.
        let path = wire_path(path)?;
        let token = self
            .signer
            .sign_request(&self.credential, method, &path, body.as_deref())?;
        let url = format!("{}{path}", self.credential.appliance_url());
        self.executor.execute(method, &url, &token, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secureauth_core::{ErrorKind, NoopHttpSend};

    fn client() -> Client {
        let cred =
            Credential::new("sa.example.com", "443", true, "secureauth1", "app", "key").unwrap();
        Client::new(cred, Context::new().with_http_send(NoopHttpSend))
    }

    #[tokio::test]
    async fn test_create_user_requires_id_and_password() {
        let _ = env_logger::builder().is_test(true).try_init();

        let cases = vec![
            (None, Some("p@ss")),
            (Some(""), Some("p@ss")),
            (Some("jdoe"), None),
            (Some("jdoe"), Some("")),
        ];

        for (user_id, password) in cases {
            let profile = NewUserProfile {
                user_id: user_id.map(str::to_string),
                password: password.map(str::to_string),
                ..Default::default()
            };
            let err = client().create_user(&profile).await.unwrap_err();
            // NoopHttpSend would have failed with a transport error.
            assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        }
    }

    #[tokio::test]
    async fn test_dfp_validate_rejects_malformed_fingerprint() {
        let err = client()
            .dfp_validate("jdoe", "10.0.0.1", "{not json", "*/*", "", "", "")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[tokio::test]
    async fn test_failures_are_returned() {
        let err = client().validate_user("jdoe").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_from_config_rejects_missing_fields() {
        let err = Client::from_config(&Config {
            host: Some("sa.example.com".to_string()),
            port: Some("443".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
