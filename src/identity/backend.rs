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

use async_trait::async_trait;
use dyn_clone::DynClone;

pub mod memory;

use crate::identity::error::IdentityProviderError;
use crate::identity::types::Group;
use crate::keystone::ServiceState;

#[async_trait]
pub trait IdentityBackend: DynClone + Send + Sync + std::fmt::Debug {
    /// Create group.
    async fn create_group(
        &self,
        state: &ServiceState,
        group: Group,
    ) -> Result<Group, IdentityProviderError>;

    /// Get single group by ID.
    async fn get_group(
        &self,
        state: &ServiceState,
        id: &str,
    ) -> Result<Option<Group>, IdentityProviderError>;

    /// Find group by name within a domain.
    async fn find_group_by_name(
        &self,
        state: &ServiceState,
        name: &str,
        domain_id: &str,
    ) -> Result<Option<Group>, IdentityProviderError>;
}

dyn_clone::clone_trait_object!(IdentityBackend);
