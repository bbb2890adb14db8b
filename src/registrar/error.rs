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
//! Registrar errors.

use thiserror::Error;

use crate::error::BuilderError;

/// Registrar error.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// A create hit a conflict but the desired entity carries no key to
    /// re-fetch the existing entry by.
    #[error("conflicting {kind} cannot be resolved without an id or name")]
    AmbiguousConflict {
        /// Entity kind.
        kind: &'static str,
    },

    #[error(transparent)]
    AssignmentProvider(#[from] crate::assignment::error::AssignmentProviderError),

    /// A create hit a conflict but the existing entry cannot be fetched
    /// back. Somebody removed it in between.
    #[error("conflicting {kind} {key} disappeared during reconciliation")]
    ConflictedResourceMissing {
        /// Entity kind.
        kind: &'static str,
        /// The key the re-fetch used.
        key: String,
    },

    #[error(transparent)]
    FederationProvider(#[from] crate::federation::error::FederationProviderError),

    #[error(transparent)]
    IdentityProvider(#[from] crate::identity::error::IdentityProviderError),

    #[error(transparent)]
    ResourceProvider(#[from] crate::resource::error::ResourceProviderError),

    /// Structures builder error.
    #[error(transparent)]
    StructBuilder(#[from] BuilderError),
}
