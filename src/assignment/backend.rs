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

use crate::assignment::error::AssignmentProviderError;
use crate::assignment::types::{Assignment, Role};
use crate::keystone::ServiceState;

#[async_trait]
pub trait AssignmentBackend: DynClone + Send + Sync + std::fmt::Debug {
    /// Create role.
    async fn create_role(
        &self,
        state: &ServiceState,
        role: Role,
    ) -> Result<Role, AssignmentProviderError>;

    /// Get single role by ID.
    async fn get_role(
        &self,
        state: &ServiceState,
        id: &str,
    ) -> Result<Option<Role>, AssignmentProviderError>;

    /// Find role by name.
    async fn find_role_by_name(
        &self,
        state: &ServiceState,
        name: &str,
    ) -> Result<Option<Role>, AssignmentProviderError>;

    /// Create role grant. Granting an already existing grant is a no-op.
    async fn create_grant(
        &self,
        state: &ServiceState,
        assignment: Assignment,
    ) -> Result<Assignment, AssignmentProviderError>;

    /// List assignments of the given actors.
    async fn list_assignments_for_actors(
        &self,
        state: &ServiceState,
        actor_ids: &[String],
    ) -> Result<Vec<Assignment>, AssignmentProviderError>;
}

dyn_clone::clone_trait_object!(AssignmentBackend);
