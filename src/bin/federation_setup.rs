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
//! Federation setup executable.
//!
//! Provisions the entities a federated identity provider needs (domain,
//! group, role, grant, identity provider, mapping, protocol). Idempotent:
//! re-running against partial prior state converges without errors.

use clap::Parser;
use eyre::{Report, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    prelude::*,
};

use keystone_federation::config::Config;
use keystone_federation::keystone::Service;
use keystone_federation::provider::Provider;
use keystone_federation::registrar::{self, Ensure, ProvisionPlanBuilder};

/// Federation setup for Keystone.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the keystone config file.
    #[arg(short, long, default_value = "/etc/keystone/keystone.conf")]
    config: PathBuf,

    /// Name of the domain owning the federated group.
    #[arg(long, env = "OS_FEDERATION_DOMAIN", default_value = "pysaml2-d")]
    domain: String,

    /// Name of the group federated users are mapped into.
    #[arg(long, env = "OS_FEDERATION_GROUP", default_value = "pysaml2-g")]
    group: String,

    /// Name of the role granted to the group on the domain.
    #[arg(long, env = "OS_FEDERATION_ROLE", default_value = "pysaml2-user")]
    role: String,

    /// ID of the identity provider.
    #[arg(long, env = "OS_FEDERATION_IDP", default_value = "pysaml2-idp")]
    idp_id: String,

    /// Remote IDs (assertion issuers) of the identity provider.
    #[arg(long, env = "OS_FEDERATION_REMOTE_IDS", value_delimiter = ',')]
    remote_ids: Vec<String>,

    /// ID of the attribute mapping.
    #[arg(long, env = "OS_FEDERATION_MAPPING", default_value = "pysaml2-mapping")]
    mapping_id: String,

    /// ID of the protocol binding the mapping to the identity provider.
    #[arg(long, env = "OS_FEDERATION_PROTOCOL", default_value = "saml2")]
    protocol_id: String,

    /// Assertion attribute carrying the user name.
    #[arg(long, env = "OS_FEDERATION_USER_ATTRIBUTE", default_value = "openstack_user")]
    user_attribute: String,

    /// Attribute values (user names) accepted by the mapping.
    #[arg(
        long,
        env = "OS_FEDERATION_ALLOWED_USERS",
        value_delimiter = ',',
        default_value = "user1,admin"
    )]
    allowed_users: Vec<String>,

    /// Verbosity level. Repeat to increase level.
    #[arg(short, long, global=true, action = clap::ArgAction::Count, display_order = 920)]
    pub verbose: u8,
}

fn report<T: std::fmt::Debug>(kind: &str, ensured: &Ensure<T>) {
    if ensured.is_created() {
        info!("created {}: {:?}", kind, ensured.get());
    } else {
        info!("found existing {}: {:?}", kind, ensured.get());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = Targets::new().with_default(match args.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .init();

    let config = Config::new(args.config)?;
    let provider = Provider::new(config.clone())?;
    let state = Arc::new(Service::new(config, provider)?);

    let plan = ProvisionPlanBuilder::default()
        .domain_name(args.domain)
        .group_name(args.group)
        .role_name(args.role)
        .idp_id(args.idp_id)
        .remote_ids(args.remote_ids)
        .mapping_id(args.mapping_id)
        .protocol_id(args.protocol_id)
        .user_attribute(args.user_attribute)
        .allowed_users(args.allowed_users)
        .build()
        .map_err(Report::new)?;

    let outcome = registrar::provision(&state, &plan).await?;
    report("domain", &outcome.domain);
    report("group", &outcome.group);
    report("role", &outcome.role);
    report("identity provider", &outcome.identity_provider);
    report("mapping", &outcome.mapping);
    report("protocol", &outcome.protocol);

    state.terminate().await?;
    Ok(())
}
