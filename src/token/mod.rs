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
//! # Token provider
//!
//! Issues and validates tokens for federated identities. A token is bound to
//! the identity provider and protocol it was mapped through and carries the
//! group memberships established by the attribute mapping. Scoped tokens are
//! only issued when at least one of the groups holds a role on the requested
//! target.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub mod backend;
pub mod error;
#[cfg(test)]
mod mock;
pub mod types;

use crate::assignment::AssignmentApi;
use crate::assignment::types::AssignmentType;
use crate::common::Scope;
use crate::config::{Config, TokenProviderDriver};
use crate::federation::types::MappedUser;
use crate::keystone::ServiceState;
use crate::resource::ResourceApi;
use crate::resource::types::{Domain, Project};
use crate::token::backend::{TokenBackend, fernet::FernetTokenBackend};
pub use crate::token::error::TokenProviderError;
pub use crate::token::types::*;

#[cfg(test)]
pub use mock::MockTokenProvider;

#[derive(Clone, Debug)]
pub struct TokenProvider {
    config: Config,
    backend_driver: Arc<dyn TokenBackend>,
}

#[async_trait]
pub trait TokenApi: Send + Sync + Clone {
    /// Issue a token for the mapped federated user with the requested scope.
    async fn issue_token(
        &self,
        state: &ServiceState,
        user: &MappedUser,
        scope: &Scope,
    ) -> Result<Token, TokenProviderError>;

    /// Encode the token into the credential handed to the user.
    fn encode_token(&self, token: &Token) -> Result<String, TokenProviderError>;

    /// Decode the credential and verify the token is still valid.
    async fn validate_token<'a>(
        &self,
        state: &ServiceState,
        credential: &'a str,
    ) -> Result<Token, TokenProviderError>;
}

impl TokenProvider {
    pub fn new(config: &Config) -> Result<Self, TokenProviderError> {
        let backend_driver: Arc<dyn TokenBackend> = match config.token.provider {
            TokenProviderDriver::Fernet => Arc::new(FernetTokenBackend::new(config)?),
        };
        Ok(Self {
            config: config.clone(),
            backend_driver,
        })
    }

    /// Calculate the expiration of a token issued now.
    fn get_new_token_expiry(&self) -> Result<DateTime<Utc>, TokenProviderError> {
        Utc::now()
            .checked_add_signed(TimeDelta::seconds(self.config.token.expiration as i64))
            .ok_or(TokenProviderError::ExpiryCalculation)
    }

    /// Resolve the project referred to by the scope, by ID or by name within
    /// an optional domain.
    async fn resolve_project_scope(
        &self,
        state: &ServiceState,
        scope: &crate::common::ProjectScope,
    ) -> Result<Project, TokenProviderError> {
        if let Some(id) = &scope.id {
            return state
                .provider
                .get_resource_provider()
                .get_project(state, id)
                .await?
                .ok_or_else(|| TokenProviderError::ProjectNotFound(id.clone()));
        }
        let Some(name) = &scope.name else {
            return Err(TokenProviderError::ScopeMissing);
        };
        let domain_id = match &scope.domain {
            Some(domain) => Some(self.resolve_domain_scope(state, domain).await?.id),
            None => None,
        };
        state
            .provider
            .get_resource_provider()
            .find_project_by_name(state, name, domain_id.as_deref())
            .await?
            .ok_or_else(|| TokenProviderError::ProjectNotFound(name.clone()))
    }

    /// Resolve the domain referred to by the scope, by ID or by name.
    async fn resolve_domain_scope(
        &self,
        state: &ServiceState,
        scope: &crate::common::DomainScope,
    ) -> Result<Domain, TokenProviderError> {
        if let Some(id) = &scope.id {
            return state
                .provider
                .get_resource_provider()
                .get_domain(state, id)
                .await?
                .ok_or_else(|| TokenProviderError::DomainNotFound(id.clone()));
        }
        let Some(name) = &scope.name else {
            return Err(TokenProviderError::ScopeMissing);
        };
        state
            .provider
            .get_resource_provider()
            .find_domain_by_name(state, name)
            .await?
            .ok_or_else(|| TokenProviderError::DomainNotFound(name.clone()))
    }

    /// Collect the role IDs the user groups hold on the target.
    async fn roles_on_target(
        &self,
        state: &ServiceState,
        user: &MappedUser,
        target_id: &str,
        r#type: AssignmentType,
    ) -> Result<Vec<String>, TokenProviderError> {
        let assignments = state
            .provider
            .get_assignment_provider()
            .list_assignments_for_groups(state, &user.group_ids)
            .await?;
        let mut role_ids: Vec<String> = Vec::new();
        for assignment in assignments
            .into_iter()
            .filter(|assignment| assignment.r#type == r#type && assignment.target_id == target_id)
        {
            if !role_ids.contains(&assignment.role_id) {
                role_ids.push(assignment.role_id);
            }
        }
        if role_ids.is_empty() {
            return Err(TokenProviderError::ActorHasNoRolesOnTarget);
        }
        Ok(role_ids)
    }
}

/// A random audit identifier in the compact url-safe form.
fn new_audit_id() -> String {
    URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes())
}

#[async_trait]
impl TokenApi for TokenProvider {
    /// Issue a token for the mapped federated user.
    #[tracing::instrument(level = "info", skip(self, state))]
    async fn issue_token(
        &self,
        state: &ServiceState,
        user: &MappedUser,
        scope: &Scope,
    ) -> Result<Token, TokenProviderError> {
        let expires_at = self.get_new_token_expiry()?;
        let audit_ids = vec![new_audit_id()];
        let methods = vec![user.protocol_id.clone()];
        let token = match scope {
            Scope::Project(project_scope) => {
                let project = self.resolve_project_scope(state, project_scope).await?;
                let role_ids = self
                    .roles_on_target(state, user, &project.id, AssignmentType::GroupProject)
                    .await?;
                Token::FederationProjectScope(
                    FederationProjectScopePayloadBuilder::default()
                        .user_id(user.id.clone())
                        .user_name(user.name.clone())
                        .methods(methods)
                        .audit_ids(audit_ids)
                        .expires_at(expires_at)
                        .idp_id(user.idp_id.clone())
                        .protocol_id(user.protocol_id.clone())
                        .group_ids(user.group_ids.clone())
                        .project_id(project.id)
                        .role_ids(role_ids)
                        .build()?,
                )
            }
            Scope::Domain(domain_scope) => {
                let domain = self.resolve_domain_scope(state, domain_scope).await?;
                let role_ids = self
                    .roles_on_target(state, user, &domain.id, AssignmentType::GroupDomain)
                    .await?;
                Token::FederationDomainScope(
                    FederationDomainScopePayloadBuilder::default()
                        .user_id(user.id.clone())
                        .user_name(user.name.clone())
                        .methods(methods)
                        .audit_ids(audit_ids)
                        .expires_at(expires_at)
                        .idp_id(user.idp_id.clone())
                        .protocol_id(user.protocol_id.clone())
                        .group_ids(user.group_ids.clone())
                        .domain_id(domain.id)
                        .role_ids(role_ids)
                        .build()?,
                )
            }
            Scope::Unscoped => {
                let assignments = state
                    .provider
                    .get_assignment_provider()
                    .list_assignments_for_groups(state, &user.group_ids)
                    .await?;
                let mut available_scopes: Vec<ScopeTarget> = Vec::new();
                for assignment in assignments {
                    let target = ScopeTarget {
                        r#type: match assignment.r#type {
                            AssignmentType::GroupDomain => ScopeTargetType::Domain,
                            AssignmentType::GroupProject => ScopeTargetType::Project,
                        },
                        id: assignment.target_id,
                    };
                    if !available_scopes.contains(&target) {
                        available_scopes.push(target);
                    }
                }
                Token::FederationUnscoped(
                    FederationUnscopedPayloadBuilder::default()
                        .user_id(user.id.clone())
                        .user_name(user.name.clone())
                        .methods(methods)
                        .audit_ids(audit_ids)
                        .expires_at(expires_at)
                        .idp_id(user.idp_id.clone())
                        .protocol_id(user.protocol_id.clone())
                        .group_ids(user.group_ids.clone())
                        .available_scopes(available_scopes)
                        .build()?,
                )
            }
        };
        Ok(token)
    }

    /// Encode the token into the credential.
    fn encode_token(&self, token: &Token) -> Result<String, TokenProviderError> {
        self.backend_driver.encode(token)
    }

    /// Decode the credential and check the expiry.
    #[tracing::instrument(level = "debug", skip(self, state, credential))]
    async fn validate_token<'a>(
        &self,
        state: &ServiceState,
        credential: &'a str,
    ) -> Result<Token, TokenProviderError> {
        let token = self.backend_driver.decode(credential)?;
        if *token.expires_at() < Utc::now() {
            return Err(TokenProviderError::Expired);
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SubsecRound;
    use fernet::Fernet;
    use std::io::Write;
    use std::path::Path;

    use crate::assignment::MockAssignmentProvider;
    use crate::assignment::types::Assignment;
    use crate::common::{DomainScopeBuilder, ProjectScopeBuilder};
    use crate::federation::types::MappedUserBuilder;
    use crate::keystone::Service;
    use crate::provider::Provider;
    use crate::resource::MockResourceProvider;
    use crate::resource::types::ProjectBuilder;

    fn token_provider(dir: &Path) -> TokenProvider {
        let mut key = std::fs::File::create(dir.join("0")).unwrap();
        key.write_all(Fernet::generate_key().as_bytes()).unwrap();
        let builder = config::Config::builder()
            .set_override(
                "fernet_tokens.key_repository",
                dir.to_str().expect("utf-8 path"),
            )
            .unwrap();
        let config = Config::try_from(builder).unwrap();
        TokenProvider::new(&config).unwrap()
    }

    fn mapped_user() -> MappedUser {
        MappedUserBuilder::default()
            .id("u1")
            .name("alice")
            .group_ids(vec!["g1".to_string()])
            .idp_id("idp1")
            .protocol_id("saml2")
            .build()
            .unwrap()
    }

    fn state_with(provider: Provider) -> ServiceState {
        Arc::new(Service::new(Config::default(), provider).unwrap())
    }

    #[tokio::test]
    async fn test_issue_project_scoped_token() {
        let dir = tempfile::tempdir().unwrap();
        let token_provider = token_provider(dir.path());

        let mut resource_mock = MockResourceProvider::default();
        resource_mock.expect_get_project().returning(|_, id| {
            Ok(Some(
                ProjectBuilder::default()
                    .id(id)
                    .name("p1")
                    .domain_id("d1")
                    .build()
                    .unwrap(),
            ))
        });
        let mut assignment_mock = MockAssignmentProvider::default();
        assignment_mock
            .expect_list_assignments_for_groups()
            .returning(|_, _| {
                Ok(vec![Assignment {
                    role_id: "r1".into(),
                    actor_id: "g1".into(),
                    target_id: "p1".into(),
                    r#type: AssignmentType::GroupProject,
                }])
            });
        let state = state_with(
            Provider::mocked_builder()
                .resource(resource_mock)
                .assignment(assignment_mock)
                .build()
                .unwrap(),
        );

        let scope = Scope::Project(ProjectScopeBuilder::default().id("p1").build().unwrap());
        let token = token_provider
            .issue_token(&state, &mapped_user(), &scope)
            .await
            .unwrap();
        match token {
            Token::FederationProjectScope(payload) => {
                assert_eq!("p1", payload.project_id);
                assert_eq!(vec!["r1".to_string()], payload.role_ids);
                assert_eq!(vec!["saml2".to_string()], payload.methods);
            }
            other => panic!("unexpected token {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_issue_scoped_token_without_roles_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let token_provider = token_provider(dir.path());

        let mut resource_mock = MockResourceProvider::default();
        resource_mock.expect_get_project().returning(|_, id| {
            Ok(Some(
                ProjectBuilder::default()
                    .id(id)
                    .name("p1")
                    .domain_id("d1")
                    .build()
                    .unwrap(),
            ))
        });
        let mut assignment_mock = MockAssignmentProvider::default();
        assignment_mock
            .expect_list_assignments_for_groups()
            .returning(|_, _| Ok(Vec::new()));
        let state = state_with(
            Provider::mocked_builder()
                .resource(resource_mock)
                .assignment(assignment_mock)
                .build()
                .unwrap(),
        );

        let scope = Scope::Project(ProjectScopeBuilder::default().id("p1").build().unwrap());
        assert!(matches!(
            token_provider
                .issue_token(&state, &mapped_user(), &scope)
                .await,
            Err(TokenProviderError::ActorHasNoRolesOnTarget)
        ));
    }

    #[tokio::test]
    async fn test_issue_domain_scoped_token_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let token_provider = token_provider(dir.path());

        let mut resource_mock = MockResourceProvider::default();
        resource_mock
            .expect_find_domain_by_name()
            .returning(|_, name| {
                Ok(Some(
                    crate::resource::types::DomainBuilder::default()
                        .id("d1")
                        .name(name)
                        .build()
                        .unwrap(),
                ))
            });
        let mut assignment_mock = MockAssignmentProvider::default();
        assignment_mock
            .expect_list_assignments_for_groups()
            .returning(|_, _| {
                Ok(vec![Assignment {
                    role_id: "r1".into(),
                    actor_id: "g1".into(),
                    target_id: "d1".into(),
                    r#type: AssignmentType::GroupDomain,
                }])
            });
        let state = state_with(
            Provider::mocked_builder()
                .resource(resource_mock)
                .assignment(assignment_mock)
                .build()
                .unwrap(),
        );

        let scope = Scope::Domain(DomainScopeBuilder::default().name("dom").build().unwrap());
        let token = token_provider
            .issue_token(&state, &mapped_user(), &scope)
            .await
            .unwrap();
        match token {
            Token::FederationDomainScope(payload) => {
                assert_eq!("d1", payload.domain_id);
                assert_eq!(vec!["r1".to_string()], payload.role_ids);
            }
            other => panic!("unexpected token {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_issue_unscoped_token_enumerates_scopes() {
        let dir = tempfile::tempdir().unwrap();
        let token_provider = token_provider(dir.path());

        let mut assignment_mock = MockAssignmentProvider::default();
        assignment_mock
            .expect_list_assignments_for_groups()
            .returning(|_, _| {
                Ok(vec![
                    Assignment {
                        role_id: "r1".into(),
                        actor_id: "g1".into(),
                        target_id: "d1".into(),
                        r#type: AssignmentType::GroupDomain,
                    },
                    Assignment {
                        role_id: "r2".into(),
                        actor_id: "g1".into(),
                        target_id: "d1".into(),
                        r#type: AssignmentType::GroupDomain,
                    },
                    Assignment {
                        role_id: "r1".into(),
                        actor_id: "g1".into(),
                        target_id: "p1".into(),
                        r#type: AssignmentType::GroupProject,
                    },
                ])
            });
        let state = state_with(
            Provider::mocked_builder()
                .assignment(assignment_mock)
                .build()
                .unwrap(),
        );

        let token = token_provider
            .issue_token(&state, &mapped_user(), &Scope::Unscoped)
            .await
            .unwrap();
        match token {
            Token::FederationUnscoped(payload) => {
                // two grants on the same domain collapse into one scope target
                assert_eq!(
                    vec![
                        ScopeTarget {
                            r#type: ScopeTargetType::Domain,
                            id: "d1".into()
                        },
                        ScopeTarget {
                            r#type: ScopeTargetType::Project,
                            id: "p1".into()
                        },
                    ],
                    payload.available_scopes
                );
            }
            other => panic!("unexpected token {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validate_token_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let token_provider = token_provider(dir.path());
        let state = state_with(Provider::mocked_builder().build().unwrap());

        let token = Token::FederationUnscoped(
            FederationUnscopedPayloadBuilder::default()
                .user_id("u1")
                .user_name("alice")
                .methods(vec!["saml2".to_string()])
                .audit_ids(vec![new_audit_id()])
                .expires_at(Utc::now().round_subsecs(0) + TimeDelta::seconds(60))
                .idp_id("idp1")
                .protocol_id("saml2")
                .group_ids(vec!["g1".to_string()])
                .build()
                .unwrap(),
        );
        let credential = token_provider.encode_token(&token).unwrap();
        let validated = token_provider
            .validate_token(&state, &credential)
            .await
            .unwrap();
        assert_eq!(token, validated);
    }

    #[tokio::test]
    async fn test_validate_expired_token_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let token_provider = token_provider(dir.path());
        let state = state_with(Provider::mocked_builder().build().unwrap());

        let token = Token::FederationUnscoped(
            FederationUnscopedPayloadBuilder::default()
                .user_id("u1")
                .user_name("alice")
                .methods(vec!["saml2".to_string()])
                .audit_ids(vec![new_audit_id()])
                .expires_at(Utc::now() - TimeDelta::seconds(1))
                .idp_id("idp1")
                .protocol_id("saml2")
                .group_ids(vec!["g1".to_string()])
                .build()
                .unwrap(),
        );
        let credential = token_provider.encode_token(&token).unwrap();
        assert!(matches!(
            token_provider.validate_token(&state, &credential).await,
            Err(TokenProviderError::Expired)
        ));
    }
}
