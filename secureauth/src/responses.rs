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

//! Responses returned by the appliance.
//!
//! The appliance reports its own verdict in `status` and `message`. A response
//! that deserializes is always returned to the caller, even when `status`
//! says the request was rejected: check [`ResponseStatus::is_success`].
//!
//! Only `status` is required, every other field falls back to its default so
//! that appliance versions adding or dropping fields keep working.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Statuses the appliance uses for a positive verdict.
const SUCCESS_STATUSES: &[&str] = &["found", "valid", "verified", "success", "accepted"];

/// Verdict reported by the appliance in a response body.
pub trait ResponseStatus {
    /// Raw `status` field, for example `found`, `invalid` or `not_found`.
    fn status(&self) -> &str;

    /// Human readable `message` field, may be empty.
    fn message(&self) -> &str;

    /// Whether the appliance accepted the request.
    fn is_success(&self) -> bool {
        SUCCESS_STATUSES
            .iter()
            .any(|v| v.eq_ignore_ascii_case(self.status()))
    }
}

macro_rules! impl_response_status {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ResponseStatus for $ty {
                fn status(&self) -> &str {
                    &self.status
                }

                fn message(&self) -> &str {
                    &self.message
                }
            }
        )+
    };
}

impl_response_status!(
    BaseResponse,
    ResponseObject,
    FactorsResponse,
    IpEvalResponse,
    AdaptiveAuthResponse,
    PushAcceptStatus,
    DfpConfirmResponse,
    DfpValidateResponse,
    JsObjectResponse,
    BehaveBioResponse,
    GroupAssociationResponse,
    UserProfileResponse,
);

/// Minimal response carrying only the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BaseResponse {
    /// Verdict, such as `found`, `valid` or `invalid`.
    pub status: String,
    /// Detail behind the verdict, may be empty.
    #[serde(default)]
    pub message: String,
}

/// Generic response of otp delivery and identity management calls.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseObject {
    /// Appliance verdict.
    pub status: String,
    /// Appliance message, often empty on success.
    #[serde(default)]
    pub message: String,
    /// User the call was about, if echoed back.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Reference of an asynchronous operation, set for push-to-accept.
    #[serde(default)]
    pub reference_id: Option<String>,
    /// One time code delivered, set by some otp deliveries.
    #[serde(default)]
    pub otp: Option<String>,
}

/// Authentication factors enrolled by a user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FactorsResponse {
    /// Outcome reported by the appliance.
    pub status: String,
    /// Readable detail.
    #[serde(default)]
    pub message: String,
    /// User the answer is about.
    #[serde(default)]
    pub user_id: String,
    /// Delivery targets the user can pick from.
    #[serde(default)]
    pub factors: Vec<Factor>,
}

/// One enrolled factor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Factor {
    /// `phone`, `email`, `kbq`, `push`, `oath`...
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Id to pass back as `factor_id`.
    #[serde(default)]
    pub id: String,
    /// Masked value of the factor, like a phone number.
    #[serde(default)]
    pub value: String,
    /// Delivery methods the factor supports.
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// Risk evaluation of an ip address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IpEvalResponse {
    /// Verdict, such as `found`, `valid` or `invalid`.
    pub status: String,
    /// Detail behind the verdict, may be empty.
    #[serde(default)]
    pub message: String,
    /// Details of the evaluation.
    #[serde(default)]
    pub ip_evaluation: IpEvaluation,
}

/// Result of an ip evaluation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IpEvaluation {
    /// How the risk was computed.
    #[serde(default)]
    pub method: String,
    /// Evaluated address.
    #[serde(default)]
    pub ip: String,
    /// Risk score, higher is riskier.
    #[serde(default)]
    pub risk_factor: i64,
    /// Traffic light color of the risk.
    #[serde(default)]
    pub risk_color: String,
    /// Readable risk level.
    #[serde(default)]
    pub risk_desc: String,
    /// Geolocation details as reported.
    #[serde(default)]
    pub geoloc: Value,
    /// Threat factoring details as reported.
    #[serde(default)]
    pub factoring: Value,
}

/// Adaptive authentication verdict.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdaptiveAuthResponse {
    /// Appliance verdict.
    pub status: String,
    /// Appliance message, often empty on success.
    #[serde(default)]
    pub message: String,
    /// User the answer is about.
    #[serde(default)]
    pub user_id: String,
    /// Workflow the realm suggests, as reported.
    #[serde(default)]
    pub realm_workflow: Value,
    /// What the caller should do next.
    #[serde(default)]
    pub suggested_action: String,
    /// Where to send the user when the verdict asks for a redirect.
    #[serde(default)]
    pub redirect_url: String,
}

/// State of a push-to-accept request.
///
/// `message` holds the decision: `PENDING`, `ACCEPTED` or `DENIED`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushAcceptStatus {
    /// Outcome reported by the appliance.
    pub status: String,
    /// Readable detail.
    #[serde(default)]
    pub message: String,
}

impl PushAcceptStatus {
    /// Whether the user accepted the push notification.
    pub fn is_accepted(&self) -> bool {
        self.message.eq_ignore_ascii_case("accepted")
    }
}

/// Result of confirming a device fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DfpConfirmResponse {
    /// Verdict, such as `found`, `valid` or `invalid`.
    pub status: String,
    /// Detail behind the verdict, may be empty.
    #[serde(default)]
    pub message: String,
    /// User the answer is about.
    #[serde(default)]
    pub user_id: String,
    /// Id of the stored fingerprint.
    #[serde(default)]
    pub fingerprint_id: String,
}

/// Result of validating a device fingerprint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DfpValidateResponse {
    /// Appliance verdict.
    pub status: String,
    /// Appliance message, often empty on success.
    #[serde(default)]
    pub message: String,
    /// Id of the stored fingerprint.
    #[serde(default)]
    pub fingerprint_id: String,
    /// Display name of the fingerprint.
    #[serde(default)]
    pub fingerprint_name: String,
    /// Overall match score.
    #[serde(default)]
    pub score: String,
    /// How close the submitted fingerprint is to the stored one.
    #[serde(default)]
    pub match_score: String,
    /// Score above which the stored fingerprint is refreshed.
    #[serde(default)]
    pub update_score: String,
}

/// Location of a javascript the browser has to load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsObjectResponse {
    /// Outcome reported by the appliance.
    pub status: String,
    /// Readable detail.
    #[serde(default)]
    pub message: String,
    /// Url of the script.
    #[serde(default)]
    pub src: String,
}

/// Result of a behavioral biometrics submission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BehaveBioResponse {
    /// Verdict, such as `found`, `valid` or `invalid`.
    pub status: String,
    /// Detail behind the verdict, may be empty.
    #[serde(default)]
    pub message: String,
    /// Scores per field, as reported.
    #[serde(default, rename = "BehaveBioResults", alias = "behaviorResults")]
    pub behavior_results: Value,
}

/// Result of a group membership change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupAssociationResponse {
    /// Appliance verdict.
    pub status: String,
    /// Appliance message, often empty on success.
    #[serde(default)]
    pub message: String,
    /// Members that could not be associated, with the reasons.
    #[serde(default)]
    pub failures: BTreeMap<String, Vec<String>>,
}

/// Profile of an existing user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    /// Outcome reported by the appliance.
    pub status: String,
    /// Readable detail.
    #[serde(default)]
    pub message: String,
    /// User the answer is about.
    #[serde(default)]
    pub user_id: String,
    /// Profile properties as reported.
    #[serde(default)]
    pub properties: Value,
    /// Knowledge based questions as reported, answers are never returned.
    #[serde(default)]
    pub knowledge_base: Value,
    /// Groups the user belongs to.
    #[serde(default)]
    pub groups: Value,
    /// Recent accesses as reported.
    #[serde(default)]
    pub access_histories: Value,
}
