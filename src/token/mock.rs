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

use crate::common::Scope;
use crate::config::Config;
use crate::federation::types::MappedUser;
use crate::keystone::ServiceState;
use crate::token::TokenApi;
use crate::token::error::TokenProviderError;
use crate::token::types::Token;

mock! {
    pub TokenProvider {
        pub fn new(cfg: &Config) -> Result<Self, TokenProviderError>;
    }

    #[async_trait]
    impl TokenApi for TokenProvider {
        async fn issue_token(
            &self,
            state: &ServiceState,
            user: &MappedUser,
            scope: &Scope,
        ) -> Result<Token, TokenProviderError>;

        fn encode_token(&self, token: &Token) -> Result<String, TokenProviderError>;

        async fn validate_token<'a>(
            &self,
            state: &ServiceState,
            credential: &'a str,
        ) -> Result<Token, TokenProviderError>;
    }

    impl Clone for TokenProvider {
        fn clone(&self) -> Self;
    }
}
