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
//! # Assignment provider
//!
//! Roles and role assignments of group actors on domain and project targets.

use async_trait::async_trait;
use uuid::Uuid;

pub mod backend;
pub mod error;
#[cfg(test)]
mod mock;
pub mod types;

use crate::assignment::backend::{AssignmentBackend, memory::MemoryBackend};
use crate::assignment::error::AssignmentProviderError;
use crate::assignment::types::{Assignment, Role};
use crate::config::Config;
use crate::keystone::ServiceState;

#[cfg(test)]
pub use mock::MockAssignmentProvider;

#[derive(Clone, Debug)]
pub struct AssignmentProvider {
    backend_driver: Box<dyn AssignmentBackend>,
}

#[async_trait]
pub trait AssignmentApi: Send + Sync + Clone {
    async fn create_role(
        &self,
        state: &ServiceState,
        role: Role,
    ) -> Result<Role, AssignmentProviderError>;

    async fn get_role<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Role>, AssignmentProviderError>;

    async fn find_role_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<Option<Role>, AssignmentProviderError>;

    async fn create_grant(
        &self,
        state: &ServiceState,
        assignment: Assignment,
    ) -> Result<Assignment, AssignmentProviderError>;

    async fn list_assignments_for_groups<'a>(
        &self,
        state: &ServiceState,
        group_ids: &'a [String],
    ) -> Result<Vec<Assignment>, AssignmentProviderError>;
}

impl AssignmentProvider {
    pub fn new(config: &Config) -> Result<Self, AssignmentProviderError> {
        let backend_driver: Box<dyn AssignmentBackend> = match config.assignment.driver.as_str() {
            "memory" => Box::new(MemoryBackend::default()),
            other => {
                return Err(AssignmentProviderError::UnsupportedDriver(
                    other.to_string(),
                ));
            }
        };
        Ok(Self { backend_driver })
    }
}

#[async_trait]
impl AssignmentApi for AssignmentProvider {
    /// Create role
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_role(
        &self,
        state: &ServiceState,
        role: Role,
    ) -> Result<Role, AssignmentProviderError> {
        let mut mod_role = role;
        if mod_role.id.is_empty() {
            mod_role.id = Uuid::new_v4().simple().to_string();
        }
        self.backend_driver.create_role(state, mod_role).await
    }

    /// Get single role
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_role<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Role>, AssignmentProviderError> {
        self.backend_driver.get_role(state, id).await
    }

    /// Find role by name
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn find_role_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<Option<Role>, AssignmentProviderError> {
        self.backend_driver.find_role_by_name(state, name).await
    }

    /// Create assignment grant.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn create_grant(
        &self,
        state: &ServiceState,
        assignment: Assignment,
    ) -> Result<Assignment, AssignmentProviderError> {
        self.backend_driver.create_grant(state, assignment).await
    }

    /// List role assignments of the given groups.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn list_assignments_for_groups<'a>(
        &self,
        state: &ServiceState,
        group_ids: &'a [String],
    ) -> Result<Vec<Assignment>, AssignmentProviderError> {
        self.backend_driver
            .list_assignments_for_actors(state, group_ids)
            .await
    }
}
