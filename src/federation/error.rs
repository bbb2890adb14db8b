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
//! Federation provider errors.

use thiserror::Error;

use crate::error::BuilderError;

/// Attribute mapping evaluation error.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The mapping document is malformed.
    #[error("invalid mapping: {0}")]
    InvalidMapping(String),

    /// No rule matched the assertion.
    #[error("no mapping rule matched the assertion")]
    NoRuleMatched,
}

/// Federation provider error.
#[derive(Debug, Error)]
pub enum FederationProviderError {
    /// Conflict with an existing entry.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A group referenced by the mapping cannot be resolved.
    #[error("mapped group {0} not found")]
    GroupNotFound(String),

    /// Identity provider not found.
    #[error("identity provider {0} not found")]
    IdentityProviderNotFound(String),

    /// Identity provider error while resolving mapped groups.
    #[error(transparent)]
    IdentityProvider(#[from] crate::identity::error::IdentityProviderError),

    /// Rule evaluation failed.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// A mapping is still referenced by a protocol.
    #[error("mapping {0} is in use by a protocol")]
    MappingInUse(String),

    /// Mapping not found.
    #[error("mapping {0} not found")]
    MappingNotFound(String),

    /// Protocol not found.
    #[error("protocol {0} not found")]
    ProtocolNotFound(String),

    /// Resource provider error while resolving mapped groups.
    #[error(transparent)]
    ResourceProvider(#[from] crate::resource::error::ResourceProviderError),

    /// Structures builder error.
    #[error(transparent)]
    StructBuilder(#[from] BuilderError),

    /// Configured backend driver is not known.
    #[error("unsupported driver {0}")]
    UnsupportedDriver(String),
}
