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

/// External identity provider trusted to assert identities.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct IdentityProvider {
    /// The ID of the identity provider. Immutable once created.
    #[builder(default)]
    pub id: String,

    /// Whether assertions of this identity provider are accepted.
    #[builder(default = "true")]
    pub enabled: bool,

    /// The ID of the domain the identity provider belongs to.
    #[builder(default)]
    pub domain_id: Option<String>,

    /// Remote IDs (assertion issuers) the identity provider is trusted for.
    #[builder(default)]
    pub remote_ids: Vec<String>,
}

/// Identity provider list filters.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct IdentityProviderListParameters {
    /// Filter identity providers by the owning domain.
    #[builder(default)]
    pub domain_id: Option<String>,
}
