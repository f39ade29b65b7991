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

//! Realm scoped resource paths of the appliance REST API.
//!
//! The signer signs exactly the string built here, and the same string is
//! appended to the appliance url, so every builder must be stable.

use secureauth_core::IdentifierEncoding;

/// Paths builds the resource paths of one realm.
///
/// Identifiers (user ids, group names, reference ids) are escaped with the
/// configured [`IdentifierEncoding`] before they're embedded.
#[derive(Debug, Clone)]
pub struct Paths {
    realm: String,
    encoding: IdentifierEncoding,
}

impl Paths {
    /// Create paths for `realm`.
    pub fn new(realm: &str, encoding: IdentifierEncoding) -> Self {
        Self {
            realm: realm.to_string(),
            encoding,
        }
    }

    fn api(&self, rest: &str) -> String {
        format!("/{}/api/v1/{rest}", self.realm)
    }

    fn id(&self, v: &str) -> String {
        self.encoding.encode(v)
    }

    /// `/{realm}/api/v1/auth`
    pub fn auth(&self) -> String {
        self.api("auth")
    }

    /// `/{realm}/api/v1/auth/{ref_id}`
    pub fn auth_status(&self, ref_id: &str) -> String {
        self.api(&format!("auth/{}", self.id(ref_id)))
    }

    /// `/{realm}/api/v1/adaptauth`
    pub fn adaptive_auth(&self) -> String {
        self.api("adaptauth")
    }

    /// `/{realm}/api/v1/ipeval`
    pub fn ip_eval(&self) -> String {
        self.api("ipeval")
    }

    /// `/{realm}/api/v1/accesshistory`
    pub fn access_history(&self) -> String {
        self.api("accesshistory")
    }

    /// `/{realm}/api/v1/users/{user_id}/factors`
    pub fn factors(&self, user_id: &str) -> String {
        self.api(&format!("users/{}/factors", self.id(user_id)))
    }

    /// `/{realm}/api/v1/dfp/confirm`
    pub fn dfp_confirm(&self) -> String {
        self.api("dfp/confirm")
    }

    /// `/{realm}/api/v1/dfp/validate`
    pub fn dfp_validate(&self) -> String {
        self.api("dfp/validate")
    }

    /// `/{realm}/api/v1/dfp/js`
    pub fn dfp_js(&self) -> String {
        self.api("dfp/js")
    }

    /// `/{realm}/api/v1/behavebio`
    pub fn behave_bio(&self) -> String {
        self.api("behavebio")
    }

    /// `/{realm}/api/v1/behavebio/js`
    pub fn behave_bio_js(&self) -> String {
        self.api("behavebio/js")
    }

    /// `/{realm}/api/v1/users`
    pub fn users(&self) -> String {
        self.api("users")
    }

    /// `/{realm}/api/v1/users/{user_id}`
    pub fn user(&self, user_id: &str) -> String {
        self.api(&format!("users/{}", self.id(user_id)))
    }

    /// `/{realm}/api/v1/users/{user_id}/resetpwd`
    pub fn user_reset_password(&self, user_id: &str) -> String {
        self.api(&format!("users/{}/resetpwd", self.id(user_id)))
    }

    /// `/{realm}/api/v1/users/{user_id}/changepwd`
    pub fn user_change_password(&self, user_id: &str) -> String {
        self.api(&format!("users/{}/changepwd", self.id(user_id)))
    }

    /// `/{realm}/api/v1/users/{user_id}/groups`
    pub fn user_groups(&self, user_id: &str) -> String {
        self.api(&format!("users/{}/groups", self.id(user_id)))
    }

    /// `/{realm}/api/v1/users/{user_id}/groups/{group}`
    pub fn user_group(&self, user_id: &str, group: &str) -> String {
        self.api(&format!(
            "users/{}/groups/{}",
            self.id(user_id),
            self.id(group)
        ))
    }

    /// `/{realm}/api/v1/groups/{group}/users`
    pub fn group_users(&self, group: &str) -> String {
        self.api(&format!("groups/{}/users", self.id(group)))
    }

    /// `/{realm}/api/v1/groups/{group}/users/{user_id}`
    pub fn group_user(&self, group: &str, user_id: &str) -> String {
        self.api(&format!(
            "groups/{}/users/{}",
            self.id(group),
            self.id(user_id)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paths() {
        let p = Paths::new("secureauth1", IdentifierEncoding::Legacy);

        let cases = vec![
            (p.auth(), "/secureauth1/api/v1/auth"),
            (p.auth_status("abc-123"), "/secureauth1/api/v1/auth/abc-123"),
            (p.adaptive_auth(), "/secureauth1/api/v1/adaptauth"),
            (p.ip_eval(), "/secureauth1/api/v1/ipeval"),
            (p.access_history(), "/secureauth1/api/v1/accesshistory"),
            (p.factors("jdoe"), "/secureauth1/api/v1/users/jdoe/factors"),
            (p.dfp_confirm(), "/secureauth1/api/v1/dfp/confirm"),
            (p.dfp_validate(), "/secureauth1/api/v1/dfp/validate"),
            (p.dfp_js(), "/secureauth1/api/v1/dfp/js"),
            (p.behave_bio(), "/secureauth1/api/v1/behavebio"),
            (p.behave_bio_js(), "/secureauth1/api/v1/behavebio/js"),
            (p.users(), "/secureauth1/api/v1/users"),
            (p.user("jdoe"), "/secureauth1/api/v1/users/jdoe"),
            (
                p.user_reset_password("jdoe"),
                "/secureauth1/api/v1/users/jdoe/resetpwd",
            ),
            (
                p.user_change_password("jdoe"),
                "/secureauth1/api/v1/users/jdoe/changepwd",
            ),
            (p.user_groups("jdoe"), "/secureauth1/api/v1/users/jdoe/groups"),
            (
                p.user_group("jdoe", "admins"),
                "/secureauth1/api/v1/users/jdoe/groups/admins",
            ),
            (p.group_users("admins"), "/secureauth1/api/v1/groups/admins/users"),
            (
                p.group_user("admins", "jdoe"),
                "/secureauth1/api/v1/groups/admins/users/jdoe",
            ),
        ];

        for (actual, expected) in cases {
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_identifiers_are_encoded() {
        let p = Paths::new("secureauth1", IdentifierEncoding::Legacy);
        assert_eq!(
            p.user("user name@x"),
            "/secureauth1/api/v1/users/user%20name%40x"
        );
        assert_eq!(
            p.group_user("a/b", "jörg"),
            "/secureauth1/api/v1/groups/a%2Fb/users/j%F6rg"
        );

        let p = Paths::new("secureauth1", IdentifierEncoding::Utf8);
        assert_eq!(p.factors("jörg"), "/secureauth1/api/v1/users/j%C3%B6rg/factors");
    }
}
