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
//! In-memory federation driver.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::federation::backend::FederationBackend;
use crate::federation::error::FederationProviderError;
use crate::federation::types::{
    IdentityProvider, IdentityProviderListParameters, Mapping, Protocol,
};
use crate::keystone::ServiceState;

#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    identity_providers: Arc<RwLock<HashMap<String, IdentityProvider>>>,
    mappings: Arc<RwLock<HashMap<String, Mapping>>>,
    // keyed by (idp_id, protocol_id)
    protocols: Arc<RwLock<HashMap<(String, String), Protocol>>>,
}

#[async_trait]
impl FederationBackend for MemoryBackend {
    async fn create_identity_provider(
        &self,
        _state: &ServiceState,
        idp: IdentityProvider,
    ) -> Result<IdentityProvider, FederationProviderError> {
        let mut idps = self.identity_providers.write().await;
        if idps.contains_key(&idp.id) {
            return Err(FederationProviderError::Conflict(format!(
                "identity provider with id {} already exists",
                idp.id
            )));
        }
        idps.insert(idp.id.clone(), idp.clone());
        Ok(idp)
    }

    async fn get_identity_provider(
        &self,
        _state: &ServiceState,
        id: &str,
    ) -> Result<Option<IdentityProvider>, FederationProviderError> {
        Ok(self.identity_providers.read().await.get(id).cloned())
    }

    async fn list_identity_providers(
        &self,
        _state: &ServiceState,
        params: &IdentityProviderListParameters,
    ) -> Result<Vec<IdentityProvider>, FederationProviderError> {
        Ok(self
            .identity_providers
            .read()
            .await
            .values()
            .filter(|idp| {
                params
                    .domain_id
                    .as_ref()
                    .is_none_or(|domain_id| idp.domain_id.as_ref() == Some(domain_id))
            })
            .cloned()
            .collect())
    }

    async fn create_mapping(
        &self,
        _state: &ServiceState,
        mapping: Mapping,
    ) -> Result<Mapping, FederationProviderError> {
        let mut mappings = self.mappings.write().await;
        if mappings.contains_key(&mapping.id) {
            return Err(FederationProviderError::Conflict(format!(
                "mapping with id {} already exists",
                mapping.id
            )));
        }
        mappings.insert(mapping.id.clone(), mapping.clone());
        Ok(mapping)
    }

    async fn get_mapping(
        &self,
        _state: &ServiceState,
        id: &str,
    ) -> Result<Option<Mapping>, FederationProviderError> {
        Ok(self.mappings.read().await.get(id).cloned())
    }

    async fn delete_mapping(
        &self,
        _state: &ServiceState,
        id: &str,
    ) -> Result<(), FederationProviderError> {
        if self
            .protocols
            .read()
            .await
            .values()
            .any(|protocol| protocol.mapping_id == id)
        {
            return Err(FederationProviderError::MappingInUse(id.to_string()));
        }
        self.mappings
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| FederationProviderError::MappingNotFound(id.to_string()))
    }

    async fn create_protocol(
        &self,
        _state: &ServiceState,
        protocol: Protocol,
    ) -> Result<Protocol, FederationProviderError> {
        if !self
            .identity_providers
            .read()
            .await
            .contains_key(&protocol.idp_id)
        {
            return Err(FederationProviderError::IdentityProviderNotFound(
                protocol.idp_id.clone(),
            ));
        }
        if !self
            .mappings
            .read()
            .await
            .contains_key(&protocol.mapping_id)
        {
            return Err(FederationProviderError::MappingNotFound(
                protocol.mapping_id.clone(),
            ));
        }
        let mut protocols = self.protocols.write().await;
        let key = (protocol.idp_id.clone(), protocol.id.clone());
        if protocols.contains_key(&key) {
            return Err(FederationProviderError::Conflict(format!(
                "protocol {} already exists for identity provider {}",
                protocol.id, protocol.idp_id
            )));
        }
        protocols.insert(key, protocol.clone());
        Ok(protocol)
    }

    async fn get_protocol(
        &self,
        _state: &ServiceState,
        idp_id: &str,
        id: &str,
    ) -> Result<Option<Protocol>, FederationProviderError> {
        Ok(self
            .protocols
            .read()
            .await
            .get(&(idp_id.to_string(), id.to_string()))
            .cloned())
    }

    async fn list_protocols(
        &self,
        _state: &ServiceState,
        idp_id: &str,
    ) -> Result<Vec<Protocol>, FederationProviderError> {
        Ok(self
            .protocols
            .read()
            .await
            .values()
            .filter(|protocol| protocol.idp_id == idp_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::keystone::Service;
    use crate::provider::Provider;

    fn state() -> ServiceState {
        Arc::new(
            Service::new(
                Config::default(),
                Provider::mocked_builder().build().expect("provider"),
            )
            .expect("service"),
        )
    }

    fn idp(id: &str) -> IdentityProvider {
        IdentityProvider {
            id: id.into(),
            enabled: true,
            domain_id: None,
            remote_ids: vec![],
        }
    }

    fn mapping(id: &str) -> Mapping {
        Mapping {
            id: id.into(),
            rules: vec![],
        }
    }

    #[tokio::test]
    async fn test_protocol_requires_idp_and_mapping() {
        let state = state();
        let backend = MemoryBackend::default();
        let protocol = Protocol {
            id: "saml2".into(),
            idp_id: "idp1".into(),
            mapping_id: "m1".into(),
        };
        assert!(matches!(
            backend.create_protocol(&state, protocol.clone()).await,
            Err(FederationProviderError::IdentityProviderNotFound(..))
        ));
        backend
            .create_identity_provider(&state, idp("idp1"))
            .await
            .unwrap();
        assert!(matches!(
            backend.create_protocol(&state, protocol.clone()).await,
            Err(FederationProviderError::MappingNotFound(..))
        ));
        backend.create_mapping(&state, mapping("m1")).await.unwrap();
        backend.create_protocol(&state, protocol).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_mapping_in_use() {
        let state = state();
        let backend = MemoryBackend::default();
        backend
            .create_identity_provider(&state, idp("idp1"))
            .await
            .unwrap();
        backend.create_mapping(&state, mapping("m1")).await.unwrap();
        backend
            .create_protocol(
                &state,
                Protocol {
                    id: "saml2".into(),
                    idp_id: "idp1".into(),
                    mapping_id: "m1".into(),
                },
            )
            .await
            .unwrap();
        assert!(matches!(
            backend.delete_mapping(&state, "m1").await,
            Err(FederationProviderError::MappingInUse(..))
        ));
    }

    #[tokio::test]
    async fn test_list_identity_providers_filters_domain() {
        let state = state();
        let backend = MemoryBackend::default();
        backend
            .create_identity_provider(&state, idp("idp1"))
            .await
            .unwrap();
        backend
            .create_identity_provider(
                &state,
                IdentityProvider {
                    domain_id: Some("d1".into()),
                    ..idp("idp2")
                },
            )
            .await
            .unwrap();
        let found = backend
            .list_identity_providers(
                &state,
                &IdentityProviderListParameters {
                    domain_id: Some("d1".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(1, found.len());
        assert_eq!("idp2", found[0].id);
    }
}
