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

//! Request payloads sent to the appliance.
//!
//! Field order is the wire order: payloads are serialized once and the
//! resulting text is what gets signed, so don't reorder fields casually.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of every `auth` call.
///
/// `type` selects what the appliance does with it: validate a user, a
/// password, a pin, a kba answer or an oath code, deliver an otp, or send a
/// push-to-accept notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthRequest {
    /// User the call is about.
    pub user_id: String,
    /// Kind of authentication.
    #[serde(rename = "type")]
    pub kind: String,
    /// Secret being validated, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Factor the call is bound to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_id: Option<String>,
    /// Extra information shown to the user in a push-to-accept request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_accept_details: Option<PushAcceptDetails>,
}

impl AuthRequest {
    pub(crate) fn new(user_id: &str, kind: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub(crate) fn with_factor_id(mut self, factor_id: &str) -> Self {
        self.factor_id = Some(factor_id.to_string());
        self
    }
}

/// Details displayed with a push-to-accept notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PushAcceptDetails {
    /// Address of the end user asking to log in.
    pub enduser_ip: String,
    /// Company shown in the notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Application shown in the notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_description: Option<String>,
}

/// Risk evaluation of an ip address for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpEvalRequest {
    /// User the evaluation is for.
    pub user_id: String,
    /// Address to evaluate.
    pub ip_address: String,
    /// Always `risk`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Adaptive authentication query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdaptiveAuthRequest {
    /// User trying to log in.
    pub user_id: String,
    /// Address the user logs in from.
    pub ip_address: String,
}

/// Records an access of `user_id` from `ip_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessHistoryRequest {
    /// User the request is about.
    pub user_id: String,
    /// Address the user connects from.
    pub ip_address: String,
}

/// Confirms a device fingerprint for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DfpConfirmRequest {
    /// User the request is about.
    pub user_id: String,
    /// Id of the device fingerprint.
    pub fingerprint_id: String,
}

/// Validates a new device fingerprint.
///
/// The fingerprint itself is produced by the appliance's javascript in the
/// browser and handed over as json, fields this client doesn't know about are
/// kept in `extra` and sent back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DfpValidateRequest {
    /// User the request is about.
    #[serde(default)]
    pub user_id: String,
    /// Address of the end user's device.
    #[serde(default)]
    pub host_address: String,
    /// Fingerprint collected in the browser.
    #[serde(default)]
    pub fingerprint: Fingerprint,
    /// Unknown fields of the browser payload.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Browser fingerprint collected by the appliance's javascript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// `Accept` header the browser sent.
    #[serde(default)]
    pub accept: String,
    /// `Accept-Charset` header the browser sent.
    #[serde(default)]
    pub accept_charset: String,
    /// `Accept-Encoding` header the browser sent.
    #[serde(default)]
    pub accept_encoding: String,
    /// `Accept-Language` header the browser sent.
    #[serde(default)]
    pub accept_language: String,
    /// Everything else the javascript collected.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Behavioral biometrics profile submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaveBioRequest {
    /// User the request is about.
    pub user_id: String,
    /// Profile produced by the behavioral biometrics javascript.
    pub behavior_profile: String,
    /// Address of the end user's device.
    pub host_address: String,
    /// `User-Agent` of the end user's browser.
    pub user_agent: String,
}

/// Resets one field of a behavioral biometrics profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaveBioResetRequest {
    /// User the request is about.
    pub user_id: String,
    /// Profile field to reset.
    pub field_name: String,
    /// Kind of the field, such as `regular` or `password`.
    pub field_type: String,
    /// Device the profile was recorded on, such as `desktop`.
    pub device_type: String,
}

/// Profile of a user created or updated through the identity management api.
///
/// Unset fields are left out of the payload so that an update only touches
/// what's given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserProfile {
    /// Required to create a user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Required to create a user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Profile properties such as `firstName` or `email1`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    /// Knowledge based questions keyed by their id.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub knowledge_base: BTreeMap<String, KnowledgeBase>,
}

/// One knowledge based question and its answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KnowledgeBase {
    /// Text of the question.
    pub question: String,
    /// Answer the user gave at enrollment.
    pub answer: String,
}

/// Password reset or change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPasswordRequest {
    /// New password set by an administrator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Password the user has now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    /// Password the user wants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

/// Users added to one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersToGroup {
    /// Users to add.
    pub user_ids: Vec<String>,
}

/// Groups one user is added to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserToGroups {
    /// Groups to add the user to.
    pub group_names: Vec<String>,
}
