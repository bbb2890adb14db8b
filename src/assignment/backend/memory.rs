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
//! In-memory assignment driver.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::assignment::backend::AssignmentBackend;
use crate::assignment::error::AssignmentProviderError;
use crate::assignment::types::{Assignment, Role};
use crate::keystone::ServiceState;

#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    roles: Arc<RwLock<HashMap<String, Role>>>,
    assignments: Arc<RwLock<Vec<Assignment>>>,
}

#[async_trait]
impl AssignmentBackend for MemoryBackend {
    async fn create_role(
        &self,
        _state: &ServiceState,
        role: Role,
    ) -> Result<Role, AssignmentProviderError> {
        let mut roles = self.roles.write().await;
        if roles.contains_key(&role.id) {
            return Err(AssignmentProviderError::Conflict(format!(
                "role with id {} already exists",
                role.id
            )));
        }
        if roles.values().any(|existing| existing.name == role.name) {
            return Err(AssignmentProviderError::Conflict(format!(
                "role with name {} already exists",
                role.name
            )));
        }
        roles.insert(role.id.clone(), role.clone());
        Ok(role)
    }

    async fn get_role(
        &self,
        _state: &ServiceState,
        id: &str,
    ) -> Result<Option<Role>, AssignmentProviderError> {
        Ok(self.roles.read().await.get(id).cloned())
    }

    async fn find_role_by_name(
        &self,
        _state: &ServiceState,
        name: &str,
    ) -> Result<Option<Role>, AssignmentProviderError> {
        Ok(self
            .roles
            .read()
            .await
            .values()
            .find(|role| role.name == name)
            .cloned())
    }

    async fn create_grant(
        &self,
        _state: &ServiceState,
        assignment: Assignment,
    ) -> Result<Assignment, AssignmentProviderError> {
        let mut assignments = self.assignments.write().await;
        if !assignments.contains(&assignment) {
            assignments.push(assignment.clone());
        }
        Ok(assignment)
    }

    async fn list_assignments_for_actors(
        &self,
        _state: &ServiceState,
        actor_ids: &[String],
    ) -> Result<Vec<Assignment>, AssignmentProviderError> {
        Ok(self
            .assignments
            .read()
            .await
            .iter()
            .filter(|assignment| actor_ids.contains(&assignment.actor_id))
            .cloned()
            .collect())
    }
}
