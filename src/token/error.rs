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
//! Token provider errors.

use thiserror::Error;

use crate::error::BuilderError;

/// Token provider error.
#[derive(Debug, Error)]
pub enum TokenProviderError {
    /// Actor has no roles on the target scope.
    #[error("actor has no roles on scope")]
    ActorHasNoRolesOnTarget,

    #[error(transparent)]
    AssignmentProvider(#[from] crate::assignment::error::AssignmentProviderError),

    /// The domain requested as scope does not exist.
    #[error("domain {0} not found")]
    DomainNotFound(String),

    /// Expired token
    #[error("token expired")]
    Expired,

    /// Token expiry calculation overflow.
    #[error("token expiry calculation failed")]
    ExpiryCalculation,

    /// Fernet Decryption
    #[error("fernet decryption error")]
    FernetDecryption(#[from] fernet::DecryptionError),

    /// Fernet key read error.
    #[error("fernet key read error: {}", source)]
    FernetKeyRead {
        /// The source of the error.
        source: std::io::Error,
        /// Key file name.
        path: std::path::PathBuf,
    },

    /// Missing fernet keys
    #[error("no usable fernet keys has been found")]
    FernetKeysMissing,

    /// Json serialization error of the token payload.
    #[error("json serde error: {}", source)]
    Json {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    /// The project requested as scope does not exist.
    #[error("project {0} not found")]
    ProjectNotFound(String),

    #[error(transparent)]
    ResourceProvider(#[from] crate::resource::error::ResourceProviderError),

    /// Target scope information is not found in the request.
    #[error("scope information missing")]
    ScopeMissing,

    /// Structures builder error.
    #[error(transparent)]
    StructBuilder(#[from] BuilderError),
}
