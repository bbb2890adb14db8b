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
//! Attribute mapping rule document.
//!
//! The wire format is the Keystone mapping rule JSON: an ordered list of
//! rules, each carrying `local` identity directives and `remote` assertion
//! conditions. Unknown keys are rejected everywhere so that a malformed
//! document can never silently widen access.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// Attribute mapping: an ordered list of rules.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
#[serde(deny_unknown_fields)]
pub struct Mapping {
    /// The ID of the mapping.
    #[builder(default)]
    pub id: String,
    /// Mapping rules, evaluated in document order.
    pub rules: Vec<MappingRule>,
}

/// Single mapping rule.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MappingRule {
    /// Local identity directives applied when the rule matches.
    pub local: Vec<LocalDirective>,
    /// Conditions against the remote assertion. All must match.
    pub remote: Vec<RemoteCondition>,
}

/// Local directive: either a user or a group produced by a matched rule.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LocalDirective {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDirective>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupDirective>,
}

/// User produced by a matched rule.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserDirective {
    /// The user name template. `{N}` placeholders substitute the Nth
    /// positional capture of the rule's conditions.
    pub name: String,
}

/// Group membership produced by a matched rule: either by group ID or by
/// group name within a domain.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroupDirective {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainRef>,
}

/// Domain reference inside a group directive.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DomainRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Condition against a single remote assertion attribute.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteCondition {
    /// The assertion attribute name.
    #[serde(rename = "type")]
    pub attribute: String,

    /// At least one attribute value must equal (or match, with `regex`)
    /// one of the listed values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_one_of: Option<Vec<String>>,

    /// No attribute value may equal (or match, with `regex`) any of the
    /// listed values. An absent attribute satisfies the condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_any_of: Option<Vec<String>>,

    /// Treat the listed values as regular expressions.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub regex: bool,
}
