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
//! # Resource provider
//!
//! Domains and projects that federated identities can be scoped to.

use async_trait::async_trait;
use uuid::Uuid;

pub mod backend;
pub mod error;
#[cfg(test)]
mod mock;
pub mod types;

use crate::config::Config;
use crate::keystone::ServiceState;
use crate::resource::backend::{ResourceBackend, memory::MemoryBackend};
use crate::resource::error::ResourceProviderError;
use crate::resource::types::{Domain, Project};

#[cfg(test)]
pub use mock::MockResourceProvider;

#[derive(Clone, Debug)]
pub struct ResourceProvider {
    backend_driver: Box<dyn ResourceBackend>,
}

#[async_trait]
pub trait ResourceApi: Send + Sync + Clone {
    async fn create_domain(
        &self,
        state: &ServiceState,
        domain: Domain,
    ) -> Result<Domain, ResourceProviderError>;

    async fn get_domain<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Domain>, ResourceProviderError>;

    async fn find_domain_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<Option<Domain>, ResourceProviderError>;

    async fn create_project(
        &self,
        state: &ServiceState,
        project: Project,
    ) -> Result<Project, ResourceProviderError>;

    async fn get_project<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Project>, ResourceProviderError>;

    async fn find_project_by_name<'a, 'b>(
        &self,
        state: &ServiceState,
        name: &'a str,
        domain_id: Option<&'b str>,
    ) -> Result<Option<Project>, ResourceProviderError>;
}

impl ResourceProvider {
    pub fn new(config: &Config) -> Result<Self, ResourceProviderError> {
        let backend_driver: Box<dyn ResourceBackend> = match config.resource.driver.as_str() {
            "memory" => Box::new(MemoryBackend::default()),
            other => {
                return Err(ResourceProviderError::UnsupportedDriver(other.to_string()));
            }
        };
        Ok(Self { backend_driver })
    }
}

#[async_trait]
impl ResourceApi for ResourceProvider {
    /// Create domain
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_domain(
        &self,
        state: &ServiceState,
        domain: Domain,
    ) -> Result<Domain, ResourceProviderError> {
        let mut mod_domain = domain;
        if mod_domain.id.is_empty() {
            mod_domain.id = Uuid::new_v4().simple().to_string();
        }
        self.backend_driver.create_domain(state, mod_domain).await
    }

    /// Get single domain by ID
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_domain<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Domain>, ResourceProviderError> {
        self.backend_driver.get_domain(state, id).await
    }

    /// Find domain by name
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn find_domain_by_name<'a>(
        &self,
        state: &ServiceState,
        name: &'a str,
    ) -> Result<Option<Domain>, ResourceProviderError> {
        self.backend_driver.find_domain_by_name(state, name).await
    }

    /// Create project
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_project(
        &self,
        state: &ServiceState,
        project: Project,
    ) -> Result<Project, ResourceProviderError> {
        let mut mod_project = project;
        if mod_project.id.is_empty() {
            mod_project.id = Uuid::new_v4().simple().to_string();
        }
        self.backend_driver.create_project(state, mod_project).await
    }

    /// Get single project by ID
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_project<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Project>, ResourceProviderError> {
        self.backend_driver.get_project(state, id).await
    }

    /// Find project by name
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn find_project_by_name<'a, 'b>(
        &self,
        state: &ServiceState,
        name: &'a str,
        domain_id: Option<&'b str>,
    ) -> Result<Option<Project>, ResourceProviderError> {
        self.backend_driver
            .find_project_by_name(state, name, domain_id)
            .await
    }
}
