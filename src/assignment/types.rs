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

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// Role that can be granted to an actor on a target.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Role {
    /// The ID of the role.
    #[builder(default)]
    pub id: String,
    /// The role name. Must be unique.
    pub name: String,
    /// The description of the role.
    #[builder(default)]
    pub description: Option<String>,
}

/// Type of the role assignment.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum AssignmentType {
    GroupDomain,
    GroupProject,
}

/// Role assignment of an actor (group) on a target (domain or project).
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct Assignment {
    /// The ID of the granted role.
    pub role_id: String,
    /// The ID of the actor (group) the role is granted to.
    pub actor_id: String,
    /// The ID of the target (domain or project) the role is granted on.
    pub target_id: String,
    /// Assignment type.
    pub r#type: AssignmentType,
}
