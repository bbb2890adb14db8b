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

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;
use crate::federation::types::mapping::DomainRef;

/// Unresolved group reference produced by the rule engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GroupRef {
    /// Group referenced by its ID. Must exist.
    Id(String),
    /// Group referenced by name within a domain. Looked up.
    Name { name: String, domain: DomainRef },
}

/// Result of the rule evaluation before group resolution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MappedIdentity {
    /// The substituted user name.
    pub user_name: String,
    /// Group references the user is placed into.
    pub groups: Vec<GroupRef>,
}

/// Fully resolved federated user. Exists only for the duration of the
/// request, never stored.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct MappedUser {
    /// Unique ID of the ephemeral user.
    pub id: String,
    /// The mapped user name.
    pub name: String,
    /// Resolved group IDs.
    pub group_ids: Vec<String>,
    /// The ID of the identity provider that asserted the user.
    pub idp_id: String,
    /// The ID of the protocol the assertion arrived over.
    pub protocol_id: String,
}
