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

/// Federation protocol binding an identity provider to a mapping.
///
/// The protocol ID (`saml2`, `openid`, ...) is unique within the owning
/// identity provider.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct Protocol {
    /// The ID of the protocol.
    pub id: String,
    /// The ID of the owning identity provider.
    pub idp_id: String,
    /// The ID of the mapping applied to assertions arriving over this
    /// protocol.
    pub mapping_id: String,
}
