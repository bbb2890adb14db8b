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
use crate::identity::IdentityApi;
use crate::identity::error::IdentityProviderError;
use crate::identity::types::*;
use crate::keystone::ServiceState;

mock! {
    pub IdentityProvider {
        pub fn new(cfg: &Config) -> Result<Self, IdentityProviderError>;
    }

    #[async_trait]
    impl IdentityApi for IdentityProvider {
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

    impl Clone for IdentityProvider {
        fn clone(&self) -> Self;
    }
}
