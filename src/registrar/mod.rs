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
//! # Resource registrar
//!
//! Idempotent reconciliation of the entities a federation deployment needs.
//! Every `ensure_*` operation attempts a create and, on a conflict, fetches
//! the existing entry back by the first key present on the desired entity.
//! Running the same plan twice converges to the same state.

pub mod error;
pub mod types;

use tracing::debug;

use crate::assignment::AssignmentApi;
use crate::assignment::types::{AssignmentBuilder, AssignmentType, Role};
use crate::federation::FederationApi;
use crate::federation::types::{
    GroupDirective, IdentityProvider, LocalDirective, Mapping, MappingBuilder, MappingRule,
    Protocol, RemoteCondition, UserDirective,
};
use crate::identity::IdentityApi;
use crate::identity::types::{Group, GroupBuilder};
use crate::keystone::ServiceState;
use crate::resource::ResourceApi;
use crate::resource::error::ResourceProviderError;
use crate::resource::types::{Domain, DomainBuilder};

pub use crate::registrar::error::RegistrarError;
pub use crate::registrar::types::{Ensure, ProvisionOutcome, ProvisionPlan, ProvisionPlanBuilder};

use crate::assignment::error::AssignmentProviderError;
use crate::assignment::types::RoleBuilder;
use crate::federation::error::FederationProviderError;
use crate::identity::error::IdentityProviderError;

/// Ensure the domain exists.
#[tracing::instrument(level = "debug", skip(state))]
pub async fn ensure_domain(
    state: &ServiceState,
    domain: Domain,
) -> Result<Ensure<Domain>, RegistrarError> {
    let resource = state.provider.get_resource_provider();
    match resource.create_domain(state, domain.clone()).await {
        Ok(created) => Ok(Ensure::Created(created)),
        Err(ResourceProviderError::Conflict(..)) => {
            let (existing, key) = if !domain.id.is_empty() {
                (resource.get_domain(state, &domain.id).await?, domain.id)
            } else if !domain.name.is_empty() {
                (
                    resource.find_domain_by_name(state, &domain.name).await?,
                    domain.name,
                )
            } else {
                return Err(RegistrarError::AmbiguousConflict { kind: "domain" });
            };
            existing.map(Ensure::Found).ok_or(
                RegistrarError::ConflictedResourceMissing {
                    kind: "domain",
                    key,
                },
            )
        }
        Err(err) => Err(err.into()),
    }
}

/// Ensure the group exists within its domain.
#[tracing::instrument(level = "debug", skip(state))]
pub async fn ensure_group(
    state: &ServiceState,
    group: Group,
) -> Result<Ensure<Group>, RegistrarError> {
    let identity = state.provider.get_identity_provider();
    match identity.create_group(state, group.clone()).await {
        Ok(created) => Ok(Ensure::Created(created)),
        Err(IdentityProviderError::Conflict(..)) => {
            let (existing, key) = if !group.id.is_empty() {
                (identity.get_group(state, &group.id).await?, group.id)
            } else if !group.name.is_empty() {
                (
                    identity
                        .find_group_by_name(state, &group.name, &group.domain_id)
                        .await?,
                    group.name,
                )
            } else {
                return Err(RegistrarError::AmbiguousConflict { kind: "group" });
            };
            existing
                .map(Ensure::Found)
                .ok_or(RegistrarError::ConflictedResourceMissing { kind: "group", key })
        }
        Err(err) => Err(err.into()),
    }
}

/// Ensure the role exists.
#[tracing::instrument(level = "debug", skip(state))]
pub async fn ensure_role(state: &ServiceState, role: Role) -> Result<Ensure<Role>, RegistrarError> {
    let assignment = state.provider.get_assignment_provider();
    match assignment.create_role(state, role.clone()).await {
        Ok(created) => Ok(Ensure::Created(created)),
        Err(AssignmentProviderError::Conflict(..)) => {
            let (existing, key) = if !role.id.is_empty() {
                (assignment.get_role(state, &role.id).await?, role.id)
            } else if !role.name.is_empty() {
                (
                    assignment.find_role_by_name(state, &role.name).await?,
                    role.name,
                )
            } else {
                return Err(RegistrarError::AmbiguousConflict { kind: "role" });
            };
            existing
                .map(Ensure::Found)
                .ok_or(RegistrarError::ConflictedResourceMissing { kind: "role", key })
        }
        Err(err) => Err(err.into()),
    }
}

/// Ensure the identity provider exists.
#[tracing::instrument(level = "debug", skip(state))]
pub async fn ensure_identity_provider(
    state: &ServiceState,
    idp: IdentityProvider,
) -> Result<Ensure<IdentityProvider>, RegistrarError> {
    let federation = state.provider.get_federation_provider();
    match federation.create_identity_provider(state, idp.clone()).await {
        Ok(created) => Ok(Ensure::Created(created)),
        Err(FederationProviderError::Conflict(..)) => {
            if idp.id.is_empty() {
                return Err(RegistrarError::AmbiguousConflict {
                    kind: "identity provider",
                });
            }
            federation
                .get_identity_provider(state, &idp.id)
                .await?
                .map(Ensure::Found)
                .ok_or(RegistrarError::ConflictedResourceMissing {
                    kind: "identity provider",
                    key: idp.id,
                })
        }
        Err(err) => Err(err.into()),
    }
}

/// Ensure the attribute mapping exists.
#[tracing::instrument(level = "debug", skip(state, mapping))]
pub async fn ensure_mapping(
    state: &ServiceState,
    mapping: Mapping,
) -> Result<Ensure<Mapping>, RegistrarError> {
    let federation = state.provider.get_federation_provider();
    match federation.create_mapping(state, mapping.clone()).await {
        Ok(created) => Ok(Ensure::Created(created)),
        Err(FederationProviderError::Conflict(..)) => {
            if mapping.id.is_empty() {
                return Err(RegistrarError::AmbiguousConflict { kind: "mapping" });
            }
            federation
                .get_mapping(state, &mapping.id)
                .await?
                .map(Ensure::Found)
                .ok_or(RegistrarError::ConflictedResourceMissing {
                    kind: "mapping",
                    key: mapping.id,
                })
        }
        Err(err) => Err(err.into()),
    }
}

/// Ensure the protocol exists for the identity provider.
#[tracing::instrument(level = "debug", skip(state))]
pub async fn ensure_protocol(
    state: &ServiceState,
    protocol: Protocol,
) -> Result<Ensure<Protocol>, RegistrarError> {
    let federation = state.provider.get_federation_provider();
    match federation.create_protocol(state, protocol.clone()).await {
        Ok(created) => Ok(Ensure::Created(created)),
        Err(FederationProviderError::Conflict(..)) => {
            let (existing, key) = if !protocol.id.is_empty() {
                (
                    federation
                        .get_protocol(state, &protocol.idp_id, &protocol.id)
                        .await?,
                    protocol.id,
                )
            } else if !protocol.mapping_id.is_empty() {
                (
                    federation
                        .list_protocols(state, &protocol.idp_id)
                        .await?
                        .into_iter()
                        .find(|existing| existing.mapping_id == protocol.mapping_id),
                    protocol.mapping_id,
                )
            } else {
                return Err(RegistrarError::AmbiguousConflict { kind: "protocol" });
            };
            existing.map(Ensure::Found).ok_or(
                RegistrarError::ConflictedResourceMissing {
                    kind: "protocol",
                    key,
                },
            )
        }
        Err(err) => Err(err.into()),
    }
}

/// The mapping rule document placing the allowed users into the group.
fn plan_rules(plan: &ProvisionPlan, group_id: &str) -> Vec<MappingRule> {
    vec![MappingRule {
        local: vec![
            LocalDirective {
                user: Some(UserDirective {
                    name: "{0}".to_string(),
                }),
                group: None,
            },
            LocalDirective {
                user: None,
                group: Some(GroupDirective {
                    id: Some(group_id.to_string()),
                    name: None,
                    domain: None,
                }),
            },
        ],
        remote: vec![RemoteCondition {
            attribute: plan.user_attribute.clone(),
            any_one_of: Some(plan.allowed_users.clone()),
            not_any_of: None,
            regex: false,
        }],
    }]
}

/// Reconcile all entities of the plan. Safe to run repeatedly.
#[tracing::instrument(level = "info", skip(state, plan))]
pub async fn provision(
    state: &ServiceState,
    plan: &ProvisionPlan,
) -> Result<ProvisionOutcome, RegistrarError> {
    let domain = ensure_domain(
        state,
        DomainBuilder::default().name(&plan.domain_name).build()?,
    )
    .await?;
    let group = ensure_group(
        state,
        GroupBuilder::default()
            .name(&plan.group_name)
            .domain_id(&domain.get().id)
            .build()?,
    )
    .await?;
    let role = ensure_role(
        state,
        RoleBuilder::default().name(&plan.role_name).build()?,
    )
    .await?;

    // The grant create is a no-op when the grant already exists.
    state
        .provider
        .get_assignment_provider()
        .create_grant(
            state,
            AssignmentBuilder::default()
                .role_id(&role.get().id)
                .actor_id(&group.get().id)
                .target_id(&domain.get().id)
                .r#type(AssignmentType::GroupDomain)
                .build()?,
        )
        .await?;
    debug!(
        "role {} granted to group {} on domain {}",
        role.get().name,
        group.get().name,
        domain.get().name
    );

    let identity_provider = ensure_identity_provider(
        state,
        crate::federation::types::IdentityProviderBuilder::default()
            .id(&plan.idp_id)
            .remote_ids(plan.remote_ids.clone())
            .build()?,
    )
    .await?;
    let mapping = ensure_mapping(
        state,
        MappingBuilder::default()
            .id(&plan.mapping_id)
            .rules(plan_rules(plan, &group.get().id))
            .build()?,
    )
    .await?;
    let protocol = ensure_protocol(
        state,
        Protocol {
            id: plan.protocol_id.clone(),
            idp_id: identity_provider.get().id.clone(),
            mapping_id: mapping.get().id.clone(),
        },
    )
    .await?;

    Ok(ProvisionOutcome {
        domain,
        group,
        role,
        identity_provider,
        mapping,
        protocol,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::assignment::MockAssignmentProvider;
    use crate::config::Config;
    use crate::federation::MockFederationProvider;
    use crate::identity::MockIdentityProvider;
    use crate::keystone::Service;
    use crate::provider::Provider;
    use crate::registrar::types::ProvisionPlanBuilder;
    use crate::resource::MockResourceProvider;

    fn sample_plan() -> ProvisionPlan {
        ProvisionPlanBuilder::default()
            .domain_name("pysaml2-d")
            .group_name("pysaml2-g")
            .role_name("pysaml2-user")
            .idp_id("pysaml2-idp")
            .remote_ids(vec!["https://idp.example.com".to_string()])
            .mapping_id("pysaml2-mapping")
            .protocol_id("saml2")
            .user_attribute("openstack_user")
            .allowed_users(vec!["user1".to_string(), "admin".to_string()])
            .build()
            .unwrap()
    }

    fn creating_mocks() -> (
        MockResourceProvider,
        MockIdentityProvider,
        MockAssignmentProvider,
        MockFederationProvider,
    ) {
        let mut resource_mock = MockResourceProvider::default();
        resource_mock.expect_create_domain().returning(|_, domain| {
            let mut created = domain;
            created.id = Uuid::new_v4().simple().to_string();
            Ok(created)
        });
        let mut identity_mock = MockIdentityProvider::default();
        identity_mock.expect_create_group().returning(|_, group| {
            let mut created = group;
            created.id = Uuid::new_v4().simple().to_string();
            Ok(created)
        });
        let mut assignment_mock = MockAssignmentProvider::default();
        assignment_mock.expect_create_role().returning(|_, role| {
            let mut created = role;
            created.id = Uuid::new_v4().simple().to_string();
            Ok(created)
        });
        assignment_mock
            .expect_create_grant()
            .times(1)
            .returning(|_, assignment| Ok(assignment));
        let mut federation_mock = MockFederationProvider::default();
        federation_mock
            .expect_create_identity_provider()
            .returning(|_, idp| Ok(idp));
        federation_mock
            .expect_create_mapping()
            .returning(|_, mapping| Ok(mapping));
        federation_mock
            .expect_create_protocol()
            .returning(|_, protocol| Ok(protocol));
        (resource_mock, identity_mock, assignment_mock, federation_mock)
    }

    fn state_with(
        resource_mock: MockResourceProvider,
        identity_mock: MockIdentityProvider,
        assignment_mock: MockAssignmentProvider,
        federation_mock: MockFederationProvider,
    ) -> ServiceState {
        Arc::new(
            Service::new(
                Config::default(),
                Provider::mocked_builder()
                    .resource(resource_mock)
                    .identity(identity_mock)
                    .assignment(assignment_mock)
                    .federation(federation_mock)
                    .build()
                    .unwrap(),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_provision_creates_everything() {
        let (resource_mock, identity_mock, assignment_mock, federation_mock) = creating_mocks();
        let state = state_with(resource_mock, identity_mock, assignment_mock, federation_mock);

        let outcome = provision(&state, &sample_plan()).await.unwrap();
        assert!(outcome.domain.is_created());
        assert!(outcome.group.is_created());
        assert!(outcome.role.is_created());
        assert!(outcome.identity_provider.is_created());
        assert!(outcome.mapping.is_created());
        assert!(outcome.protocol.is_created());
        assert_eq!("pysaml2-idp", outcome.protocol.get().idp_id);
        assert_eq!("pysaml2-mapping", outcome.protocol.get().mapping_id);

        // the mapping places the users into the ensured group
        let rules = &outcome.mapping.get().rules;
        assert_eq!(
            Some(outcome.group.get().id.clone()),
            rules[0].local[1].group.as_ref().unwrap().id
        );
        assert_eq!(
            Some(vec!["user1".to_string(), "admin".to_string()]),
            rules[0].remote[0].any_one_of
        );
    }

    #[tokio::test]
    async fn test_provision_converges_on_existing_state() {
        let mut resource_mock = MockResourceProvider::default();
        resource_mock
            .expect_create_domain()
            .returning(|_, domain| Err(ResourceProviderError::Conflict(domain.name)));
        resource_mock
            .expect_find_domain_by_name()
            .returning(|_, name| {
                Ok(Some(
                    DomainBuilder::default().id("d1").name(name).build().unwrap(),
                ))
            });
        let mut identity_mock = MockIdentityProvider::default();
        identity_mock
            .expect_create_group()
            .returning(|_, group| Err(IdentityProviderError::Conflict(group.name)));
        identity_mock
            .expect_find_group_by_name()
            .returning(|_, name, domain_id| {
                Ok(Some(
                    GroupBuilder::default()
                        .id("g1")
                        .name(name)
                        .domain_id(domain_id)
                        .build()
                        .unwrap(),
                ))
            });
        let mut assignment_mock = MockAssignmentProvider::default();
        assignment_mock
            .expect_create_role()
            .returning(|_, role| Err(AssignmentProviderError::Conflict(role.name)));
        assignment_mock
            .expect_find_role_by_name()
            .returning(|_, name| {
                Ok(Some(
                    RoleBuilder::default().id("r1").name(name).build().unwrap(),
                ))
            });
        assignment_mock
            .expect_create_grant()
            .times(1)
            .returning(|_, assignment| Ok(assignment));
        let mut federation_mock = MockFederationProvider::default();
        federation_mock
            .expect_create_identity_provider()
            .returning(|_, idp| Err(FederationProviderError::Conflict(idp.id)));
        federation_mock
            .expect_get_identity_provider()
            .returning(|_, id| {
                Ok(Some(
                    crate::federation::types::IdentityProviderBuilder::default()
                        .id(id)
                        .build()
                        .unwrap(),
                ))
            });
        federation_mock
            .expect_create_mapping()
            .returning(|_, mapping| Err(FederationProviderError::Conflict(mapping.id)));
        federation_mock.expect_get_mapping().returning(|_, id| {
            Ok(Some(Mapping {
                id: id.into(),
                rules: Vec::new(),
            }))
        });
        federation_mock
            .expect_create_protocol()
            .returning(|_, protocol| Err(FederationProviderError::Conflict(protocol.id)));
        federation_mock
            .expect_get_protocol()
            .returning(|_, idp_id, id| {
                Ok(Some(Protocol {
                    id: id.into(),
                    idp_id: idp_id.into(),
                    mapping_id: "pysaml2-mapping".into(),
                }))
            });

        let state = state_with(resource_mock, identity_mock, assignment_mock, federation_mock);

        let outcome = provision(&state, &sample_plan()).await.unwrap();
        assert!(!outcome.domain.is_created());
        assert!(!outcome.group.is_created());
        assert!(!outcome.role.is_created());
        assert!(!outcome.identity_provider.is_created());
        assert!(!outcome.mapping.is_created());
        assert!(!outcome.protocol.is_created());
        assert_eq!("d1", outcome.domain.get().id);
        assert_eq!("g1", outcome.group.get().id);
    }

    #[tokio::test]
    async fn test_conflict_without_keys_is_ambiguous() {
        let mut resource_mock = MockResourceProvider::default();
        resource_mock
            .expect_create_domain()
            .returning(|_, _| Err(ResourceProviderError::Conflict("domain".into())));
        let state = state_with(
            resource_mock,
            MockIdentityProvider::default(),
            MockAssignmentProvider::default(),
            MockFederationProvider::default(),
        );

        let result = ensure_domain(&state, Domain::default()).await;
        assert!(matches!(
            result,
            Err(RegistrarError::AmbiguousConflict { kind: "domain" })
        ));
    }

    #[tokio::test]
    async fn test_conflicted_entry_gone_is_reported() {
        let mut resource_mock = MockResourceProvider::default();
        resource_mock
            .expect_create_domain()
            .returning(|_, domain| Err(ResourceProviderError::Conflict(domain.name)));
        resource_mock
            .expect_find_domain_by_name()
            .returning(|_, _| Ok(None));
        let state = state_with(
            resource_mock,
            MockIdentityProvider::default(),
            MockAssignmentProvider::default(),
            MockFederationProvider::default(),
        );

        let result = ensure_domain(
            &state,
            DomainBuilder::default().name("gone").build().unwrap(),
        )
        .await;
        assert!(matches!(
            result,
            Err(RegistrarError::ConflictedResourceMissing { kind: "domain", .. })
        ));
    }

    #[tokio::test]
    async fn test_ensure_domain_prefers_id_over_name() {
        let mut resource_mock = MockResourceProvider::default();
        resource_mock
            .expect_create_domain()
            .returning(|_, domain| Err(ResourceProviderError::Conflict(domain.id)));
        resource_mock.expect_get_domain().times(1).returning(|_, id| {
            Ok(Some(
                DomainBuilder::default().id(id).name("existing").build().unwrap(),
            ))
        });
        let state = state_with(
            resource_mock,
            MockIdentityProvider::default(),
            MockAssignmentProvider::default(),
            MockFederationProvider::default(),
        );

        let ensured = ensure_domain(
            &state,
            DomainBuilder::default()
                .id("d1")
                .name("renamed")
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
        assert!(!ensured.is_created());
        assert_eq!("existing", ensured.get().name);
    }
}
