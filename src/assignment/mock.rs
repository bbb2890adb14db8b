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

use crate::assignment::AssignmentApi;
use crate::assignment::error::AssignmentProviderError;
use crate::assignment::types::*;
use crate::config::Config;
use crate::keystone::ServiceState;

mock! {
    pub AssignmentProvider {
        pub fn new(cfg: &Config) -> Result<Self, AssignmentProviderError>;
    }

    #[async_trait]
    impl AssignmentApi for AssignmentProvider {
        async fn create_role(
            &self,
            state: &ServiceState,
            role: Role,
        ) -> Result<Role, AssignmentProviderError>;

        async fn get_role<'a>(
            &self,
            state: &ServiceState,
            id: &'a str,
        ) -> Result<Option<Role>, AssignmentProviderError>;

        async fn find_role_by_name<'a>(
            &self,
            state: &ServiceState,
            name: &'a str,
        ) -> Result<Option<Role>, AssignmentProviderError>;

        async fn create_grant(
            &self,
            state: &ServiceState,
            assignment: Assignment,
        ) -> Result<Assignment, AssignmentProviderError>;

        async fn list_assignments_for_groups<'a>(
            &self,
            state: &ServiceState,
            group_ids: &'a [String],
        ) -> Result<Vec<Assignment>, AssignmentProviderError>;
    }

    impl Clone for AssignmentProvider {
        fn clone(&self) -> Self;
    }
}
