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

//! # Keystone-NG federation core
//!
//! The federation subsystem of the Keystone identity service mediates
//! between external identity providers and the local identity store: a
//! signed assertion about a remote user is translated through a declarative
//! attribute mapping into local identity constructs, and the result is
//! exchanged for a scoped Keystone token.
//!
//! This crate carries that core:
//!
//! - the **attribute mapping rule engine** evaluating ordered mapping rules
//!   against remote assertions ([`federation::mapper`]),
//! - the **federation configuration providers** for identity providers,
//!   mappings and protocols ([`federation`]),
//! - the **idempotent resource registrar** provisioning the identity
//!   provider / mapping / protocol / group / role graph so that setup can be
//!   re-run safely against partial prior state ([`registrar`]),
//! - the **handshake mediator** driving the service provider ↔ identity
//!   provider redirect and form-POST chain from the client side
//!   ([`mediator`]),
//! - the **token provider** issuing Fernet-encrypted scoped and unscoped
//!   tokens from the mapped identity ([`token`]).
//!
//! The HTTP API surface, the SQL drivers and the policy engine of the full
//! service are intentionally not part of this crate; every provider is
//! backed by a pluggable backend trait so those drivers can be supplied by
//! the embedding service.

pub mod assignment;
pub mod auth;
pub mod common;
pub mod config;
pub mod error;
pub mod federation;
pub mod identity;
pub mod keystone;
pub mod mediator;
pub mod provider;
pub mod registrar;
pub mod resource;
pub mod token;
