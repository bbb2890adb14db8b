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
//! Common types shared between the subsystems.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// Requested authorization scope.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Scope {
    /// Project scope.
    Project(ProjectScope),
    /// Domain scope.
    Domain(DomainScope),
    /// No scope requested.
    Unscoped,
}

/// Project scope information.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct ProjectScope {
    /// The ID of the project.
    #[builder(default)]
    pub id: Option<String>,
    /// The name of the project.
    #[builder(default)]
    pub name: Option<String>,
    /// The domain owning the project, used to disambiguate the name.
    #[builder(default)]
    pub domain: Option<DomainScope>,
}

/// Domain scope information.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct DomainScope {
    /// The ID of the domain.
    #[builder(default)]
    pub id: Option<String>,
    /// The name of the domain.
    #[builder(default)]
    pub name: Option<String>,
}
