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

pub mod fernet;

use crate::token::TokenProviderError;
use crate::token::types::Token;

/// Token codec turning a token payload into an opaque credential and back.
pub trait TokenBackend: Send + Sync + std::fmt::Debug {
    /// Encode the token into an opaque credential.
    fn encode(&self, token: &Token) -> Result<String, TokenProviderError>;

    /// Decode a credential back into the token. Decoding does not check
    /// expiry.
    fn decode(&self, credential: &str) -> Result<Token, TokenProviderError>;
}
