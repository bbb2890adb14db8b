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

/// Domain.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Domain {
    /// The ID of the domain.
    #[builder(default)]
    pub id: String,
    /// The domain name. Must be unique.
    pub name: String,
    /// Whether the domain is enabled.
    #[builder(default = "true")]
    pub enabled: bool,
}

/// Project.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Project {
    /// The ID of the project.
    #[builder(default)]
    pub id: String,
    /// The project name. Must be unique within the owning domain.
    pub name: String,
    /// The ID of the domain owning the project.
    pub domain_id: String,
    /// Whether the project is enabled.
    #[builder(default = "true")]
    pub enabled: bool,
}
