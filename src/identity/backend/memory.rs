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
//! In-memory identity driver.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::identity::backend::IdentityBackend;
use crate::identity::error::IdentityProviderError;
use crate::identity::types::Group;
use crate::keystone::ServiceState;

#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    groups: Arc<RwLock<HashMap<String, Group>>>,
}

#[async_trait]
impl IdentityBackend for MemoryBackend {
    async fn create_group(
        &self,
        _state: &ServiceState,
        group: Group,
    ) -> Result<Group, IdentityProviderError> {
        let mut groups = self.groups.write().await;
        if groups.contains_key(&group.id) {
            return Err(IdentityProviderError::Conflict(format!(
                "group with id {} already exists",
                group.id
            )));
        }
        if groups
            .values()
            .any(|existing| existing.name == group.name && existing.domain_id == group.domain_id)
        {
            return Err(IdentityProviderError::Conflict(format!(
                "group with name {} already exists in domain {}",
                group.name, group.domain_id
            )));
        }
        groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn get_group(
        &self,
        _state: &ServiceState,
        id: &str,
    ) -> Result<Option<Group>, IdentityProviderError> {
        Ok(self.groups.read().await.get(id).cloned())
    }

    async fn find_group_by_name(
        &self,
        _state: &ServiceState,
        name: &str,
        domain_id: &str,
    ) -> Result<Option<Group>, IdentityProviderError> {
        Ok(self
            .groups
            .read()
            .await
            .values()
            .find(|group| group.name == name && group.domain_id == domain_id)
            .cloned())
    }
}
