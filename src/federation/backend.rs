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

use crate::federation::error::FederationProviderError;
use crate::federation::types::{
    IdentityProvider, IdentityProviderListParameters, Mapping, Protocol,
};
use crate::keystone::ServiceState;

#[async_trait]
pub trait FederationBackend: DynClone + Send + Sync + std::fmt::Debug {
    /// Create identity provider.
    async fn create_identity_provider(
        &self,
        state: &ServiceState,
        idp: IdentityProvider,
    ) -> Result<IdentityProvider, FederationProviderError>;

    /// Get single identity provider by ID.
    async fn get_identity_provider(
        &self,
        state: &ServiceState,
        id: &str,
    ) -> Result<Option<IdentityProvider>, FederationProviderError>;

    /// List identity providers.
    async fn list_identity_providers(
        &self,
        state: &ServiceState,
        params: &IdentityProviderListParameters,
    ) -> Result<Vec<IdentityProvider>, FederationProviderError>;

    /// Create mapping.
    async fn create_mapping(
        &self,
        state: &ServiceState,
        mapping: Mapping,
    ) -> Result<Mapping, FederationProviderError>;

    /// Get single mapping by ID.
    async fn get_mapping(
        &self,
        state: &ServiceState,
        id: &str,
    ) -> Result<Option<Mapping>, FederationProviderError>;

    /// Delete mapping. Fails when a protocol still references it.
    async fn delete_mapping(
        &self,
        state: &ServiceState,
        id: &str,
    ) -> Result<(), FederationProviderError>;

    /// Create protocol. The referenced identity provider and mapping must
    /// exist.
    async fn create_protocol(
        &self,
        state: &ServiceState,
        protocol: Protocol,
    ) -> Result<Protocol, FederationProviderError>;

    /// Get single protocol of an identity provider.
    async fn get_protocol(
        &self,
        state: &ServiceState,
        idp_id: &str,
        id: &str,
    ) -> Result<Option<Protocol>, FederationProviderError>;

    /// List protocols of an identity provider.
    async fn list_protocols(
        &self,
        state: &ServiceState,
        idp_id: &str,
    ) -> Result<Vec<Protocol>, FederationProviderError>;
}

dyn_clone::clone_trait_object!(FederationBackend);
