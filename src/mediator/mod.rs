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
//! # Handshake mediator
//!
//! Drives the browser side of the web-SSO handshake between the service
//! provider and the identity provider: fetch the auth page, submit the IdP
//! login form with the user credentials, relay the assertion response back
//! to the service provider. Cookies are kept across the steps, every HTTP
//! exchange is bounded by the configured step timeout and any server error
//! aborts the handshake before anything else is sent.

use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub mod error;
pub mod form;

use crate::config::Config;
pub use crate::mediator::error::MediatorError;
use crate::mediator::form::Form;

/// Step of the handshake state machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HandshakeStep {
    /// Fetching the auth page from the service provider.
    Init,
    /// Submitting the login form to the identity provider.
    IdpLogin,
    /// Relaying the assertion response to the service provider.
    IdpResponse,
    /// The handshake finished.
    Complete,
}

impl fmt::Display for HandshakeStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            HandshakeStep::Init => "init",
            HandshakeStep::IdpLogin => "idp_login",
            HandshakeStep::IdpResponse => "idp_response",
            HandshakeStep::Complete => "complete",
        })
    }
}

/// User credentials for the IdP login form.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// The login name.
    pub login: String,
    /// The password.
    pub password: SecretString,
}

/// Final answer of the service provider.
#[derive(Clone, Debug)]
pub struct HandshakeOutcome {
    /// The HTTP status of the final response.
    pub status: u16,
    /// The headers of the final response.
    pub headers: HeaderMap,
    /// The body of the final response.
    pub body: String,
    /// The issued token credential, when the service provider returned one.
    pub subject_token: Option<String>,
}

/// Outcome of a single bounded HTTP exchange.
struct StepResponse {
    status: reqwest::StatusCode,
    url: Url,
    headers: HeaderMap,
    body: String,
}

#[derive(Clone, Debug)]
pub struct HandshakeMediator {
    client: reqwest::Client,
    service_url: Option<Url>,
    step_timeout: Duration,
}

impl HandshakeMediator {
    pub fn new(config: &Config) -> Result<Self, MediatorError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            service_url: config.mediator.service_url.clone(),
            step_timeout: Duration::from_secs(config.mediator.step_timeout),
        })
    }

    /// The federated auth URL of the configured service provider.
    pub fn auth_url(&self, idp_id: &str, protocol_id: &str) -> Result<Url, MediatorError> {
        let service_url = self
            .service_url
            .as_ref()
            .ok_or(MediatorError::ServiceUrlMissing)?;
        Ok(service_url.join(&format!(
            "v3/OS-FEDERATION/identity_providers/{idp_id}/protocols/{protocol_id}/auth"
        ))?)
    }

    /// Run a single HTTP exchange under the step timeout and abort on a
    /// server error.
    async fn execute(
        &self,
        step: HandshakeStep,
        request: reqwest::RequestBuilder,
    ) -> Result<StepResponse, MediatorError> {
        let response = tokio::time::timeout(self.step_timeout, async {
            let response = request.send().await?;
            let status = response.status();
            let url = response.url().clone();
            let headers = response.headers().clone();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(StepResponse {
                status,
                url,
                headers,
                body,
            })
        })
        .await
        .map_err(|_| MediatorError::Timeout { step })??;

        if response.status.is_server_error() {
            return Err(MediatorError::HandshakeFailed {
                step,
                status: response.status.as_u16(),
                body: response.body,
            });
        }
        debug!("handshake {} answered {}", step, response.status);
        Ok(response)
    }

    /// Perform the whole handshake against the auth URL.
    #[tracing::instrument(level = "info", skip(self, credentials))]
    pub async fn authenticate(
        &self,
        auth_url: Url,
        credentials: &Credentials,
    ) -> Result<HandshakeOutcome, MediatorError> {
        // Init: the service provider redirects to the IdP login page.
        let init = self
            .execute(HandshakeStep::Init, self.client.get(auth_url))
            .await?;

        let mut login_form = Form::parse(HandshakeStep::Init, &init.url, &init.body)?;
        login_form.set("login", &credentials.login);
        login_form.set("password", credentials.password.expose_secret());

        // IdpLogin: the IdP answers with the auto-submit relay form carrying
        // the assertion response.
        let login = self
            .execute(
                HandshakeStep::IdpLogin,
                self.client
                    .post(login_form.action.clone())
                    .form(&login_form.fields),
            )
            .await?;

        let relay_form = Form::parse(HandshakeStep::IdpLogin, &login.url, &login.body)?;

        // IdpResponse: relay the assertion back to the service provider.
        let done = self
            .execute(
                HandshakeStep::IdpResponse,
                self.client
                    .post(relay_form.action.clone())
                    .form(&relay_form.fields),
            )
            .await?;

        let subject_token = done
            .headers
            .get("x-subject-token")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        debug!("handshake {}", HandshakeStep::Complete);

        Ok(HandshakeOutcome {
            status: done.status.as_u16(),
            headers: done.headers,
            body: done.body,
            subject_token,
        })
    }
}
