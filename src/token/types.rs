// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// Token of a federated user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Token {
    FederationUnscoped(FederationUnscopedPayload),
    FederationProjectScope(FederationProjectScopePayload),
    FederationDomainScope(FederationDomainScopePayload),
}

impl Token {
    pub fn user_id(&self) -> &str {
        match self {
            Token::FederationUnscoped(payload) => &payload.user_id,
            Token::FederationProjectScope(payload) => &payload.user_id,
            Token::FederationDomainScope(payload) => &payload.user_id,
        }
    }

    pub fn expires_at(&self) -> &DateTime<Utc> {
        match self {
            Token::FederationUnscoped(payload) => &payload.expires_at,
            Token::FederationProjectScope(payload) => &payload.expires_at,
            Token::FederationDomainScope(payload) => &payload.expires_at,
        }
    }

    pub fn audit_ids(&self) -> &[String] {
        match self {
            Token::FederationUnscoped(payload) => &payload.audit_ids,
            Token::FederationProjectScope(payload) => &payload.audit_ids,
            Token::FederationDomainScope(payload) => &payload.audit_ids,
        }
    }

    pub fn methods(&self) -> &[String] {
        match self {
            Token::FederationUnscoped(payload) => &payload.methods,
            Token::FederationProjectScope(payload) => &payload.methods,
            Token::FederationDomainScope(payload) => &payload.methods,
        }
    }
}

/// Kind of a scope target available to an unscoped token holder.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ScopeTargetType {
    Project,
    Domain,
}

/// Scope available to the holder of an unscoped token.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScopeTarget {
    pub r#type: ScopeTargetType,
    pub id: String,
}

/// Unscoped token payload with the identity provider bind. Enumerates the
/// scopes the holder can exchange it for.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct FederationUnscopedPayload {
    pub user_id: String,
    pub user_name: String,
    pub methods: Vec<String>,
    pub audit_ids: Vec<String>,
    pub expires_at: DateTime<Utc>,
    pub idp_id: String,
    pub protocol_id: String,
    pub group_ids: Vec<String>,
    #[builder(default)]
    pub available_scopes: Vec<ScopeTarget>,
}

/// Project scoped token payload with the identity provider bind.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct FederationProjectScopePayload {
    pub user_id: String,
    pub user_name: String,
    pub methods: Vec<String>,
    pub audit_ids: Vec<String>,
    pub expires_at: DateTime<Utc>,
    pub idp_id: String,
    pub protocol_id: String,
    pub group_ids: Vec<String>,
    pub project_id: String,
    pub role_ids: Vec<String>,
}

/// Domain scoped token payload with the identity provider bind.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct FederationDomainScopePayload {
    pub user_id: String,
    pub user_name: String,
    pub methods: Vec<String>,
    pub audit_ids: Vec<String>,
    pub expires_at: DateTime<Utc>,
    pub idp_id: String,
    pub protocol_id: String,
    pub group_ids: Vec<String>,
    pub domain_id: String,
    pub role_ids: Vec<String>,
}
