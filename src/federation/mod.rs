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
//! # Federation provider
//!
//! Identity providers, attribute mappings and protocols, plus the
//! translation of a remote assertion into an ephemeral [`MappedUser`].

use async_trait::async_trait;
use uuid::Uuid;

pub mod backend;
pub mod error;
pub mod mapper;
#[cfg(test)]
mod mock;
pub mod types;

use crate::config::Config;
use crate::federation::backend::{FederationBackend, memory::MemoryBackend};
use crate::federation::error::FederationProviderError;
use crate::federation::types::{
    Assertion, GroupRef, IdentityProvider, IdentityProviderListParameters, MappedUser,
    MappedUserBuilder, Mapping, Protocol,
};
use crate::identity::IdentityApi;
use crate::keystone::ServiceState;
use crate::resource::ResourceApi;

#[cfg(test)]
pub use mock::MockFederationProvider;

#[derive(Clone, Debug)]
pub struct FederationProvider {
    backend_driver: Box<dyn FederationBackend>,
}

#[async_trait]
pub trait FederationApi: Send + Sync + Clone {
    async fn create_identity_provider(
        &self,
        state: &ServiceState,
        idp: IdentityProvider,
    ) -> Result<IdentityProvider, FederationProviderError>;

    async fn get_identity_provider<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<IdentityProvider>, FederationProviderError>;

    async fn list_identity_providers(
        &self,
        state: &ServiceState,
        params: &IdentityProviderListParameters,
    ) -> Result<Vec<IdentityProvider>, FederationProviderError>;

    async fn create_mapping(
        &self,
        state: &ServiceState,
        mapping: Mapping,
    ) -> Result<Mapping, FederationProviderError>;

    async fn get_mapping<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Mapping>, FederationProviderError>;

    async fn delete_mapping<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<(), FederationProviderError>;

    async fn create_protocol(
        &self,
        state: &ServiceState,
        protocol: Protocol,
    ) -> Result<Protocol, FederationProviderError>;

    async fn get_protocol<'a, 'b>(
        &self,
        state: &ServiceState,
        idp_id: &'a str,
        id: &'b str,
    ) -> Result<Option<Protocol>, FederationProviderError>;

    async fn list_protocols<'a>(
        &self,
        state: &ServiceState,
        idp_id: &'a str,
    ) -> Result<Vec<Protocol>, FederationProviderError>;

    /// Translate the assertion into an ephemeral user through the mapping
    /// bound to the protocol.
    async fn map_assertion<'a, 'b>(
        &self,
        state: &ServiceState,
        idp_id: &'a str,
        protocol_id: &'b str,
        assertion: &Assertion,
    ) -> Result<MappedUser, FederationProviderError>;
}

impl FederationProvider {
    pub fn new(config: &Config) -> Result<Self, FederationProviderError> {
        let backend_driver: Box<dyn FederationBackend> = match config.federation.driver.as_str() {
            "memory" => Box::new(MemoryBackend::default()),
            other => {
                return Err(FederationProviderError::UnsupportedDriver(
                    other.to_string(),
                ));
            }
        };
        Ok(Self { backend_driver })
    }

    /// Resolve a group reference produced by the rule engine. Fail closed:
    /// a group the mapping names must exist.
    async fn resolve_group(
        &self,
        state: &ServiceState,
        group_ref: &GroupRef,
    ) -> Result<String, FederationProviderError> {
        match group_ref {
            GroupRef::Id(id) => state
                .provider
                .get_identity_provider()
                .get_group(state, id)
                .await?
                .map(|group| group.id)
                .ok_or_else(|| FederationProviderError::GroupNotFound(id.clone())),
            GroupRef::Name { name, domain } => {
                let domain = if let Some(domain_id) = &domain.id {
                    state
                        .provider
                        .get_resource_provider()
                        .get_domain(state, domain_id)
                        .await?
                        .ok_or_else(|| FederationProviderError::GroupNotFound(name.clone()))?
                } else if let Some(domain_name) = &domain.name {
                    state
                        .provider
                        .get_resource_provider()
                        .find_domain_by_name(state, domain_name)
                        .await?
                        .ok_or_else(|| FederationProviderError::GroupNotFound(name.clone()))?
                } else {
                    return Err(FederationProviderError::Mapping(
                        error::MappingError::InvalidMapping(
                            "group domain reference carries neither id nor name".into(),
                        ),
                    ));
                };
                state
                    .provider
                    .get_identity_provider()
                    .find_group_by_name(state, name, &domain.id)
                    .await?
                    .map(|group| group.id)
                    .ok_or_else(|| FederationProviderError::GroupNotFound(name.clone()))
            }
        }
    }
}

#[async_trait]
impl FederationApi for FederationProvider {
    /// Create identity provider
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_identity_provider(
        &self,
        state: &ServiceState,
        idp: IdentityProvider,
    ) -> Result<IdentityProvider, FederationProviderError> {
        let mut mod_idp = idp;
        if mod_idp.id.is_empty() {
            mod_idp.id = Uuid::new_v4().simple().to_string();
        }
        self.backend_driver
            .create_identity_provider(state, mod_idp)
            .await
    }

    /// Get single identity provider by ID
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_identity_provider<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<IdentityProvider>, FederationProviderError> {
        self.backend_driver.get_identity_provider(state, id).await
    }

    /// List identity providers
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn list_identity_providers(
        &self,
        state: &ServiceState,
        params: &IdentityProviderListParameters,
    ) -> Result<Vec<IdentityProvider>, FederationProviderError> {
        self.backend_driver
            .list_identity_providers(state, params)
            .await
    }

    /// Create mapping. The rule document is validated before it is
    /// accepted.
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_mapping(
        &self,
        state: &ServiceState,
        mapping: Mapping,
    ) -> Result<Mapping, FederationProviderError> {
        let mut mod_mapping = mapping;
        if mod_mapping.id.is_empty() {
            mod_mapping.id = Uuid::new_v4().simple().to_string();
        }
        mapper::validate(&mod_mapping)?;
        self.backend_driver.create_mapping(state, mod_mapping).await
    }

    /// Get single mapping by ID
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_mapping<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<Option<Mapping>, FederationProviderError> {
        self.backend_driver.get_mapping(state, id).await
    }

    /// Delete mapping
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn delete_mapping<'a>(
        &self,
        state: &ServiceState,
        id: &'a str,
    ) -> Result<(), FederationProviderError> {
        self.backend_driver.delete_mapping(state, id).await
    }

    /// Create protocol
    #[tracing::instrument(level = "debug", skip(self, state))]
    async fn create_protocol(
        &self,
        state: &ServiceState,
        protocol: Protocol,
    ) -> Result<Protocol, FederationProviderError> {
        self.backend_driver.create_protocol(state, protocol).await
    }

    /// Get single protocol of an identity provider
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn get_protocol<'a, 'b>(
        &self,
        state: &ServiceState,
        idp_id: &'a str,
        id: &'b str,
    ) -> Result<Option<Protocol>, FederationProviderError> {
        self.backend_driver.get_protocol(state, idp_id, id).await
    }

    /// List protocols of an identity provider
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn list_protocols<'a>(
        &self,
        state: &ServiceState,
        idp_id: &'a str,
    ) -> Result<Vec<Protocol>, FederationProviderError> {
        self.backend_driver.list_protocols(state, idp_id).await
    }

    /// Translate the assertion into an ephemeral user.
    #[tracing::instrument(level = "debug", skip(self, state, assertion))]
    async fn map_assertion<'a, 'b>(
        &self,
        state: &ServiceState,
        idp_id: &'a str,
        protocol_id: &'b str,
        assertion: &Assertion,
    ) -> Result<MappedUser, FederationProviderError> {
        let protocol = self
            .backend_driver
            .get_protocol(state, idp_id, protocol_id)
            .await?
            .ok_or_else(|| FederationProviderError::ProtocolNotFound(protocol_id.to_string()))?;
        let mapping = self
            .backend_driver
            .get_mapping(state, &protocol.mapping_id)
            .await?
            .ok_or_else(|| {
                FederationProviderError::MappingNotFound(protocol.mapping_id.clone())
            })?;

        let identity = mapper::evaluate(&mapping, assertion)?;

        let mut group_ids: Vec<String> = Vec::new();
        for group_ref in &identity.groups {
            let group_id = self.resolve_group(state, group_ref).await?;
            if !group_ids.contains(&group_id) {
                group_ids.push(group_id);
            }
        }

        Ok(MappedUserBuilder::default()
            .id(Uuid::new_v4().simple().to_string())
            .name(identity.user_name)
            .group_ids(group_ids)
            .idp_id(idp_id)
            .protocol_id(protocol_id)
            .build()?)
    }
}
