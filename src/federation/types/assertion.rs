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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Remote assertion: attribute name to list of values.
///
/// Request scoped, never persisted. A protocol head (SAML2, OIDC, ...)
/// normalizes whatever it receives into this shape before the mapping is
/// evaluated.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Assertion {
    attributes: HashMap<String, Vec<String>>,
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set attribute values, replacing any previous values.
    pub fn insert<N: Into<String>>(&mut self, name: N, values: Vec<String>) {
        self.attributes.insert(name.into(), values);
    }

    /// Get attribute values.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.attributes.get(name).map(Vec::as_slice)
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<String>)> for Assertion {
    fn from_iter<I: IntoIterator<Item = (N, Vec<String>)>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(name, values)| (name.into(), values))
                .collect(),
        }
    }
}
