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

use crate::keystone::ServiceState;
use crate::resource::error::ResourceProviderError;
use crate::resource::types::{Domain, Project};

#[async_trait]
pub trait ResourceBackend: DynClone + Send + Sync + std::fmt::Debug {
    /// Create domain.
    async fn create_domain(
        &self,
        state: &ServiceState,
        domain: Domain,
    ) -> Result<Domain, ResourceProviderError>;

    /// Get single domain by ID.
    async fn get_domain(
        &self,
        state: &ServiceState,
        id: &str,
    ) -> Result<Option<Domain>, ResourceProviderError>;

    /// Find domain by name.
    async fn find_domain_by_name(
        &self,
        state: &ServiceState,
        name: &str,
    ) -> Result<Option<Domain>, ResourceProviderError>;

    /// Create project.
    async fn create_project(
        &self,
        state: &ServiceState,
        project: Project,
    ) -> Result<Project, ResourceProviderError>;

    /// Get single project by ID.
    async fn get_project(
        &self,
        state: &ServiceState,
        id: &str,
    ) -> Result<Option<Project>, ResourceProviderError>;

    /// Find project by name, optionally restricted to a domain.
    async fn find_project_by_name(
        &self,
        state: &ServiceState,
        name: &str,
        domain_id: Option<&str>,
    ) -> Result<Option<Project>, ResourceProviderError>;
}

dyn_clone::clone_trait_object!(ResourceBackend);
