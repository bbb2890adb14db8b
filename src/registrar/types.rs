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

use crate::assignment::types::Role;
use crate::error::BuilderError;
use crate::federation::types::{IdentityProvider, Mapping, Protocol};
use crate::identity::types::Group;
use crate::resource::types::Domain;

/// Result of an idempotent create: either the entity was created now or an
/// equivalent entry already existed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Ensure<T> {
    /// The entity was created by this call.
    Created(T),
    /// An equivalent entity already existed.
    Found(T),
}

impl<T> Ensure<T> {
    pub fn get(&self) -> &T {
        match self {
            Ensure::Created(entity) | Ensure::Found(entity) => entity,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Ensure::Created(entity) | Ensure::Found(entity) => entity,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Ensure::Created(..))
    }
}

/// Desired federation state: the full set of entities required to accept
/// assertions of a single identity provider.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct ProvisionPlan {
    /// Name of the domain owning the federated group.
    pub domain_name: String,
    /// Name of the group federated users are mapped into.
    pub group_name: String,
    /// Name of the role granted to the group on the domain.
    pub role_name: String,
    /// The ID of the identity provider.
    pub idp_id: String,
    /// Remote IDs (assertion issuers) of the identity provider.
    #[builder(default)]
    pub remote_ids: Vec<String>,
    /// The ID of the attribute mapping.
    pub mapping_id: String,
    /// The ID of the protocol binding the mapping to the identity provider.
    pub protocol_id: String,
    /// The assertion attribute carrying the user name.
    pub user_attribute: String,
    /// The attribute values accepted by the mapping.
    pub allowed_users: Vec<String>,
}

/// Entities reconciled by a provisioning run.
#[derive(Clone, Debug)]
pub struct ProvisionOutcome {
    pub domain: Ensure<Domain>,
    pub group: Ensure<Group>,
    pub role: Ensure<Role>,
    pub identity_provider: Ensure<IdentityProvider>,
    pub mapping: Ensure<Mapping>,
    pub protocol: Ensure<Protocol>,
}
