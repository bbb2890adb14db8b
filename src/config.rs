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

use config::{File, FileFormat};
use eyre::{Report, WrapErr};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    /// Assignments (roles) related configuration.
    #[serde(default)]
    pub assignment: AssignmentSection,

    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthSection,

    /// Federation configuration.
    #[serde(default)]
    pub federation: FederationSection,

    /// Fernet tokens.
    #[serde(default)]
    pub fernet_tokens: FernetTokenSection,

    /// Identity provider related configuration.
    #[serde(default)]
    pub identity: IdentitySection,

    /// Handshake mediator configuration.
    #[serde(default)]
    pub mediator: MediatorSection,

    /// Resource provider related configuration.
    #[serde(default)]
    pub resource: ResourceSection,

    /// Token.
    #[serde(default)]
    pub token: TokenSection,
}

/// Authentication configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthSection {
    /// Authentication methods to be enabled and used for token validation.
    #[serde(deserialize_with = "csv")]
    pub methods: Vec<String>,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            methods: vec!["saml2".into(), "openid".into()],
        }
    }
}

pub fn csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?
        .split(',')
        .map(Into::into)
        .collect())
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssignmentSection {
    #[serde(default = "default_memory_driver")]
    pub driver: String,
}

impl Default for AssignmentSection {
    fn default() -> Self {
        Self {
            driver: default_memory_driver(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FederationSection {
    #[serde(default = "default_memory_driver")]
    pub driver: String,
}

impl Default for FederationSection {
    fn default() -> Self {
        Self {
            driver: default_memory_driver(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdentitySection {
    #[serde(default = "default_memory_driver")]
    pub driver: String,
}

impl Default for IdentitySection {
    fn default() -> Self {
        Self {
            driver: default_memory_driver(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResourceSection {
    #[serde(default = "default_memory_driver")]
    pub driver: String,
}

impl Default for ResourceSection {
    fn default() -> Self {
        Self {
            driver: default_memory_driver(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FernetTokenSection {
    /// Directory containing Fernet keys, one key per file named by index.
    pub key_repository: PathBuf,
    /// Number of repository keys used for decryption (the primary key plus
    /// the not yet rotated-out secondary keys).
    pub max_active_keys: usize,
}

impl Default for FernetTokenSection {
    fn default() -> Self {
        Self {
            key_repository: "/etc/keystone/fernet-keys/".into(),
            max_active_keys: 3,
        }
    }
}

/// Supported token provider drivers.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenProviderDriver {
    #[default]
    Fernet,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenSection {
    /// The amount of time that a token should remain valid (in seconds).
    pub expiration: usize,

    /// Token provider driver.
    #[serde(default)]
    pub provider: TokenProviderDriver,
}

impl Default for TokenSection {
    fn default() -> Self {
        Self {
            expiration: 3600,
            provider: TokenProviderDriver::default(),
        }
    }
}

/// Handshake mediator configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct MediatorSection {
    /// Base URL of the service provider (the Keystone deployment exposing
    /// the federated auth endpoint).
    pub service_url: Option<Url>,

    /// Bounded per-step timeout for every HTTP exchange of the handshake
    /// (in seconds).
    pub step_timeout: u64,
}

impl Default for MediatorSection {
    fn default() -> Self {
        Self {
            service_url: None,
            step_timeout: 30,
        }
    }
}

fn default_memory_driver() -> String {
    "memory".into()
}

impl Config {
    pub fn new(path: PathBuf) -> Result<Self, Report> {
        let mut builder = config::Config::builder();

        if std::path::Path::new(&path).is_file() {
            builder = builder.add_source(File::from(path).format(FileFormat::Ini));
        }

        builder.try_into()
    }
}

impl TryFrom<config::ConfigBuilder<config::builder::DefaultState>> for Config {
    type Error = Report;
    fn try_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, Self::Error> {
        let mut builder = builder;
        builder = builder
            .set_default("fernet_tokens.key_repository", "/etc/keystone/fernet-keys/")?
            .set_default("fernet_tokens.max_active_keys", "3")?
            .set_default("mediator.step_timeout", "30")?
            .set_default("token.expiration", "3600")?;

        builder
            .build()
            .wrap_err("Failed to read configuration file")?
            .try_deserialize()
            .wrap_err("Failed to parse configuration file")
    }
}
