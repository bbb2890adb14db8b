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
//! In-memory resource driver.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::keystone::ServiceState;
use crate::resource::backend::ResourceBackend;
use crate::resource::error::ResourceProviderError;
use crate::resource::types::{Domain, Project};

#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    domains: Arc<RwLock<HashMap<String, Domain>>>,
    projects: Arc<RwLock<HashMap<String, Project>>>,
}

#[async_trait]
impl ResourceBackend for MemoryBackend {
    async fn create_domain(
        &self,
        _state: &ServiceState,
        domain: Domain,
    ) -> Result<Domain, ResourceProviderError> {
        let mut domains = self.domains.write().await;
        if domains.contains_key(&domain.id) {
            return Err(ResourceProviderError::Conflict(format!(
                "domain with id {} already exists",
                domain.id
            )));
        }
        if domains.values().any(|existing| existing.name == domain.name) {
            return Err(ResourceProviderError::Conflict(format!(
                "domain with name {} already exists",
                domain.name
            )));
        }
        domains.insert(domain.id.clone(), domain.clone());
        Ok(domain)
    }

    async fn get_domain(
        &self,
        _state: &ServiceState,
        id: &str,
    ) -> Result<Option<Domain>, ResourceProviderError> {
        Ok(self.domains.read().await.get(id).cloned())
    }

    async fn find_domain_by_name(
        &self,
        _state: &ServiceState,
        name: &str,
    ) -> Result<Option<Domain>, ResourceProviderError> {
        Ok(self
            .domains
            .read()
            .await
            .values()
            .find(|domain| domain.name == name)
            .cloned())
    }

    async fn create_project(
        &self,
        _state: &ServiceState,
        project: Project,
    ) -> Result<Project, ResourceProviderError> {
        if !self
            .domains
            .read()
            .await
            .contains_key(&project.domain_id)
        {
            return Err(ResourceProviderError::DomainNotFound(
                project.domain_id.clone(),
            ));
        }
        let mut projects = self.projects.write().await;
        if projects.contains_key(&project.id) {
            return Err(ResourceProviderError::Conflict(format!(
                "project with id {} already exists",
                project.id
            )));
        }
        if projects
            .values()
            .any(|existing| existing.name == project.name && existing.domain_id == project.domain_id)
        {
            return Err(ResourceProviderError::Conflict(format!(
                "project with name {} already exists in domain {}",
                project.name, project.domain_id
            )));
        }
        projects.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    async fn get_project(
        &self,
        _state: &ServiceState,
        id: &str,
    ) -> Result<Option<Project>, ResourceProviderError> {
        Ok(self.projects.read().await.get(id).cloned())
    }

    async fn find_project_by_name(
        &self,
        _state: &ServiceState,
        name: &str,
        domain_id: Option<&str>,
    ) -> Result<Option<Project>, ResourceProviderError> {
        Ok(self
            .projects
            .read()
            .await
            .values()
            .find(|project| {
                project.name == name
                    && domain_id.is_none_or(|domain_id| project.domain_id == domain_id)
            })
            .cloned())
    }
}
