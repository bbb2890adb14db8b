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
//! # Error
//!
//! Diverse errors that can occur during the Keystone processing (not the API).
use thiserror::Error;

use crate::assignment::error::*;
use crate::auth::AuthenticationError;
use crate::federation::error::*;
use crate::identity::error::*;
use crate::mediator::error::*;
use crate::registrar::error::*;
use crate::resource::error::*;
use crate::token::TokenProviderError;

/// Keystone error.
#[derive(Debug, Error)]
pub enum KeystoneError {
    #[error(transparent)]
    AssignmentError {
        #[from]
        source: AssignmentProviderError,
    },

    #[error(transparent)]
    Authentication {
        #[from]
        source: AuthenticationError,
    },

    #[error(transparent)]
    FederationError {
        #[from]
        source: FederationProviderError,
    },

    #[error(transparent)]
    IdentityError {
        #[from]
        source: IdentityProviderError,
    },

    #[error(transparent)]
    IO {
        #[from]
        source: std::io::Error,
    },

    /// Json serialization error.
    #[error("json serde error: {}", source)]
    JsonError {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Mediator {
        #[from]
        source: MediatorError,
    },

    #[error(transparent)]
    Registrar {
        #[from]
        source: RegistrarError,
    },

    #[error(transparent)]
    ResourceError {
        #[from]
        source: ResourceProviderError,
    },

    #[error(transparent)]
    TokenProvider {
        #[from]
        source: TokenProviderError,
    },

    /// Url parsing error
    #[error(transparent)]
    UrlParse {
        #[from]
        source: url::ParseError,
    },
}

/// Builder error of the structures built with `derive_builder`.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BuilderError(String);

impl From<derive_builder::UninitializedFieldError> for BuilderError {
    fn from(value: derive_builder::UninitializedFieldError) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BuilderError {
    fn from(value: String) -> Self {
        Self(value)
    }
}
