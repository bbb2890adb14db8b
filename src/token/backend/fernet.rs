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
//! Fernet token codec.
//!
//! Keys live in the key repository directory, one base64 key per file named
//! by its rotation index. The highest index is the primary key used for
//! encryption; up to `max_active_keys` keys participate in decryption so
//! that tokens issued before a rotation stay valid.

use fernet::{Fernet, MultiFernet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::token::TokenProviderError;
use crate::token::backend::TokenBackend;
use crate::token::types::Token;

#[derive(Clone, Debug)]
pub struct FernetTokenBackend {
    key_repository: PathBuf,
    max_active_keys: usize,
}

impl FernetTokenBackend {
    /// Construction does not touch the key repository. Keys are loaded when
    /// a token is first encoded or decoded, so tooling that never handles
    /// tokens runs without one.
    pub fn new(config: &Config) -> Result<Self, TokenProviderError> {
        Ok(Self {
            key_repository: config.fernet_tokens.key_repository.clone(),
            max_active_keys: config.fernet_tokens.max_active_keys,
        })
    }

    /// Load the repository keys and build the decryption chain. Done per
    /// operation so a key rotation is picked up without a restart.
    fn multi(&self) -> Result<MultiFernet, TokenProviderError> {
        let keys = load_keys(&self.key_repository, self.max_active_keys)?;
        if keys.is_empty() {
            return Err(TokenProviderError::FernetKeysMissing);
        }
        let fernets = keys
            .iter()
            .map(|key| Fernet::new(key).ok_or(TokenProviderError::FernetKeysMissing))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MultiFernet::new(fernets))
    }
}

/// Read repository keys sorted by rotation index, newest first.
fn load_keys(repository: &Path, max_active_keys: usize) -> Result<Vec<String>, TokenProviderError> {
    let mut keys: Vec<(u64, String)> = Vec::new();
    let entries = fs::read_dir(repository).map_err(|source| TokenProviderError::FernetKeyRead {
        source,
        path: repository.to_path_buf(),
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| TokenProviderError::FernetKeyRead {
            source,
            path: repository.to_path_buf(),
        })?;
        let path = entry.path();
        let Some(index) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.parse::<u64>().ok())
        else {
            continue;
        };
        let content =
            fs::read_to_string(&path).map_err(|source| TokenProviderError::FernetKeyRead {
                source,
                path: path.clone(),
            })?;
        let key = content.trim().to_string();
        if !key.is_empty() {
            keys.push((index, key));
        }
    }
    keys.sort_by_key(|(index, _)| std::cmp::Reverse(*index));
    keys.truncate(max_active_keys);
    Ok(keys.into_iter().map(|(_, key)| key).collect())
}

impl TokenBackend for FernetTokenBackend {
    fn encode(&self, token: &Token) -> Result<String, TokenProviderError> {
        let payload = serde_json::to_vec(token)?;
        Ok(self.multi()?.encrypt(&payload))
    }

    fn decode(&self, credential: &str) -> Result<Token, TokenProviderError> {
        let payload = self.multi()?.decrypt(credential)?;
        Ok(serde_json::from_slice(&payload)?)
    }
}
