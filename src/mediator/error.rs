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
//! Handshake mediator errors.

use thiserror::Error;

use crate::mediator::HandshakeStep;

/// Handshake mediator error.
#[derive(Debug, Error)]
pub enum MediatorError {
    /// An HTML form in one of the handshake pages cannot be parsed.
    #[error("form parsing failed: {0}")]
    FormParse(String),

    /// A handshake party answered with a server error. The handshake is
    /// aborted before anything else is sent.
    #[error("handshake failed at {step}: status {status}")]
    HandshakeFailed {
        /// The step the failure happened at.
        step: HandshakeStep,
        /// The HTTP status code.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// A handshake page carries no HTML form to continue with.
    #[error("no form found in the response of {step}")]
    NoFormFound {
        /// The step whose response was expected to carry a form.
        step: HandshakeStep,
    },

    /// The service provider URL is not configured.
    #[error("mediator.service_url is not configured")]
    ServiceUrlMissing,

    /// A single handshake exchange took longer than the configured step
    /// timeout.
    #[error("handshake timed out at {step}")]
    Timeout {
        /// The step that timed out.
        step: HandshakeStep,
    },

    #[error(transparent)]
    Url(#[from] url::ParseError),
}
