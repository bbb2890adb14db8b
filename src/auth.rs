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

//! Federated authentication.
//!
//! The single entry point gluing the attribute mapping and the token issuer
//! together. Whatever goes wrong inside (unknown identity provider, no
//! matching mapping rule, missing group) is logged with the failure stage and
//! collapsed into a generic `Unauthorized` answer so that the caller learns
//! nothing about the deployment internals.

use std::fmt::Display;
use thiserror::Error;
use tracing::warn;

use crate::common::Scope;
use crate::federation::FederationApi;
use crate::federation::types::Assertion;
use crate::keystone::ServiceState;
use crate::token::{TokenApi, types::Token};

#[derive(Error, Debug)]
pub enum AuthenticationError {
    /// Unauthorized
    #[error("The request you have made requires authentication.")]
    Unauthorized,
}

/// Result of a successful federated authentication.
#[derive(Clone, Debug)]
pub struct AuthenticatedToken {
    /// The issued token payload.
    pub token: Token,
    /// The encoded credential handed to the user.
    pub credential: String,
}

/// Log the denial reason with its stage and return the opaque answer.
pub fn deny(stage: &str, detail: impl Display) -> AuthenticationError {
    warn!("denying authentication at {}: {}", stage, detail);
    AuthenticationError::Unauthorized
}

/// Authenticate a federated user from the assertion attributes.
#[tracing::instrument(level = "info", skip(state, assertion))]
pub async fn federated_authenticate(
    state: &ServiceState,
    idp_id: &str,
    protocol_id: &str,
    assertion: &Assertion,
    scope: &Scope,
) -> Result<AuthenticatedToken, AuthenticationError> {
    if !state
        .config
        .auth
        .methods
        .iter()
        .any(|method| method == protocol_id)
    {
        return Err(deny(
            "method selection",
            format!("{protocol_id} is not an enabled authentication method"),
        ));
    }

    let federation = state.provider.get_federation_provider();
    let idp = federation
        .get_identity_provider(state, idp_id)
        .await
        .map_err(|err| deny("identity provider lookup", err))?
        .ok_or_else(|| deny("identity provider lookup", format!("{idp_id} is unknown")))?;
    if !idp.enabled {
        return Err(deny(
            "identity provider lookup",
            format!("{idp_id} is disabled"),
        ));
    }

    let user = federation
        .map_assertion(state, idp_id, protocol_id, assertion)
        .await
        .map_err(|err| deny("attribute mapping", err))?;

    let token_provider = state.provider.get_token_provider();
    let token = token_provider
        .issue_token(state, &user, scope)
        .await
        .map_err(|err| deny("token issue", err))?;
    let credential = token_provider
        .encode_token(&token)
        .map_err(|err| deny("token encode", err))?;

    Ok(AuthenticatedToken { token, credential })
}
