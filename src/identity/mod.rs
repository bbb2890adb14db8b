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
//! # Identity provider
//!
//! Groups that mapped federated users are placed into. Local users are not
//! part of this crate, the federated user exists only for the lifetime of
//! its token.

use async_trait::async_trait;
use uuid::Uuid;

pub mod backend;
pub mod error;
#[cfg(test)]
mod mock;
pub mod types;

use crate::config::Config;
use crate::identity::backend::{IdentityBackend, memory::MemoryBackend};
use crate::identity::error::IdentityProviderError;
use crate::identity::types::Group;
use crate::keystone::ServiceState;

#[cfg(test)]
pub use mock::MockIdentityProvider;

#[derive(Clone, Debug)]
pub struct IdentityProvider {
    backend_driver: Box<dyn IdentityBackend>,
}

#[async_trait]
pub trait IdentityApi: Send + Sync + Clone {
    async fn create_group(
        &self,
        state: &ServiceState,
        group: Group,
    ) -> Result<Group, IdentityProviderError>;

    async fn get_group<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Group>, IdentityProviderError>;

    async fn find_group_by_name<'a, 'b>(
        &self,
        state: &ServiceState,
        name: &'a str,
        domain_id: &'b str,
    ) -> Result<Option<Group>, IdentityProviderError>;
}

impl IdentityProvider {
    pub fn new(config: &Config) -> Result<Self, IdentityProviderError> {
        let backend_driver: Box<dyn IdentityBackend> = match config.identity.driver.as_str() {
            "memory" => Box::new(MemoryBackend::default()),
            other => {
                return Err(IdentityProviderError::UnsupportedDriver(other.to_string()));
            }
        };
        Ok(Self { backend_driver })
    }
}

#[async_trait]
impl IdentityApi for IdentityProvider {
    /// Create group
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_group(
        &self,
        state: &ServiceState,
        group: Group,
    ) -> Result<Group, IdentityProviderError> {
        let mut mod_group = group;
        if mod_group.id.is_empty() {
            mod_group.id = Uuid::new_v4().simple().to_string();
        }
        self.backend_driver.create_group(state, mod_group).await
    }

    /// Get single group by ID
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_group<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Group>, IdentityProviderError> {
        self.backend_driver.get_group(state, id).await
    }

    /// Find group by name within a domain
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn find_group_by_name<'a, 'b>(
        &self,
        state: &ServiceState,
        name: &'a str,
        domain_id: &'b str,
    ) -> Result<Option<Group>, IdentityProviderError> {
        self.backend_driver
            .find_group_by_name(state, name, domain_id)
            .await
    }
}
