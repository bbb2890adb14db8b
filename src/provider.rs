// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
//! # Provider manager
//!
//! Provider manager provides access to the individual service providers. This
//! gives an easy interact for passing overall manager down to the individual
//! providers that might need to call other providers while also allowing an
//! easy injection of mocked providers.
use derive_builder::Builder;
use mockall_double::double;

use crate::assignment::AssignmentApi;
#[double]
use crate::assignment::AssignmentProvider;
use crate::config::Config;
use crate::error::KeystoneError;
use crate::federation::FederationApi;
#[double]
use crate::federation::FederationProvider;
use crate::identity::IdentityApi;
#[double]
use crate::identity::IdentityProvider;
use crate::resource::ResourceApi;
#[double]
use crate::resource::ResourceProvider;
use crate::token::TokenApi;
#[double]
use crate::token::TokenProvider;

/// Global provider manager.
#[derive(Builder, Clone)]
// It is necessary to use the owned pattern since otherwise builder invokes clone which immediately
// confuses mockall used in tests
#[builder(pattern = "owned")]
pub struct Provider {
    /// Configuration.
    pub config: Config,
    /// Assignment provider.
    assignment: AssignmentProvider,
    /// Federation provider.
    federation: FederationProvider,
    /// Identity provider.
    identity: IdentityProvider,
    /// Resource provider.
    resource: ResourceProvider,
    /// Token provider.
    token: TokenProvider,
}

impl Provider {
    pub fn new(cfg: Config) -> Result<Self, KeystoneError> {
        let assignment_provider = AssignmentProvider::new(&cfg)?;
        let federation_provider = FederationProvider::new(&cfg)?;
        let identity_provider = IdentityProvider::new(&cfg)?;
        let resource_provider = ResourceProvider::new(&cfg)?;
        let token_provider = TokenProvider::new(&cfg)?;

        Ok(Self {
            config: cfg,
            assignment: assignment_provider,
            federation: federation_provider,
            identity: identity_provider,
            resource: resource_provider,
            token: token_provider,
        })
    }

    /// Get the assignment provider.
    pub fn get_assignment_provider(&self) -> &impl AssignmentApi {
        &self.assignment
    }

    /// Get the federation provider.
    pub fn get_federation_provider(&self) -> &impl FederationApi {
        &self.federation
    }

    /// Get the identity provider.
    pub fn get_identity_provider(&self) -> &impl IdentityApi {
        &self.identity
    }

    /// Get the resource provider.
    pub fn get_resource_provider(&self) -> &impl ResourceApi {
        &self.resource
    }

    /// Get the token provider.
    pub fn get_token_provider(&self) -> &impl TokenApi {
        &self.token
    }
}

#[cfg(test)]
impl Provider {
    pub fn mocked_builder() -> ProviderBuilder {
        let config = Config::default();
        let assignment_mock = crate::assignment::MockAssignmentProvider::default();
        let federation_mock = crate::federation::MockFederationProvider::default();
        let identity_mock = crate::identity::MockIdentityProvider::default();
        let resource_mock = crate::resource::MockResourceProvider::default();
        let token_mock = crate::token::MockTokenProvider::default();

        ProviderBuilder::default()
            .config(config.clone())
            .assignment(assignment_mock)
            .federation(federation_mock)
            .identity(identity_mock)
            .resource(resource_mock)
            .token(token_mock)
    }
}
