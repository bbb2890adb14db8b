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
use mockall::mock;

use crate::config::Config;
use crate::federation::FederationApi;
use crate::federation::error::FederationProviderError;
use crate::federation::types::*;
use crate::keystone::ServiceState;

mock! {
    pub FederationProvider {
        pub fn new(cfg: &Config) -> Result<Self, FederationProviderError>;
    }

    #[async_trait]
    impl FederationApi for FederationProvider {
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

        async fn map_assertion<'a, 'b>(
            &self,
            state: &ServiceState,
            idp_id: &'a str,
            protocol_id: &'b str,
            assertion: &Assertion,
        ) -> Result<MappedUser, FederationProviderError>;
    }

    impl Clone for FederationProvider {
        fn clone(&self) -> Self;
    }
}
