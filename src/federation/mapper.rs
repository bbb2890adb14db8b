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
//! # Attribute mapping rule engine
//!
//! Pure evaluation of a [`Mapping`] against an [`Assertion`]. Rules are
//! evaluated in document order and the first rule whose `remote` conditions
//! all match wins. Matching is fail closed: an assertion that matches no
//! rule yields [`MappingError::NoRuleMatched`], never a default identity.
//!
//! While a rule is matched its conditions contribute positional captures in
//! condition order: a bare condition contributes the first non-empty
//! attribute value, `any_one_of` contributes the matched value (or, with
//! `regex`, the pattern's capture groups), `not_any_of` contributes nothing.
//! The user name template substitutes `{N}` with capture `N`.

use regex::Regex;

use crate::federation::error::MappingError;
use crate::federation::types::{
    Assertion, GroupRef, LocalDirective, MappedIdentity, Mapping, RemoteCondition,
};

/// Validate the mapping document beyond its JSON shape.
///
/// Called at mapping registration and again defensively at evaluation.
pub fn validate(mapping: &Mapping) -> Result<(), MappingError> {
    if mapping.rules.is_empty() {
        return Err(MappingError::InvalidMapping("mapping has no rules".into()));
    }
    for rule in &mapping.rules {
        if rule.local.is_empty() {
            return Err(MappingError::InvalidMapping(
                "rule has no local directives".into(),
            ));
        }
        if rule.remote.is_empty() {
            return Err(MappingError::InvalidMapping(
                "rule has no remote conditions".into(),
            ));
        }
        for directive in &rule.local {
            validate_directive(directive)?;
        }
        for condition in &rule.remote {
            validate_condition(condition)?;
        }
    }
    Ok(())
}

fn validate_directive(directive: &LocalDirective) -> Result<(), MappingError> {
    match (&directive.user, &directive.group) {
        (None, None) => Err(MappingError::InvalidMapping(
            "local directive carries neither user nor group".into(),
        )),
        (Some(_), Some(_)) => Err(MappingError::InvalidMapping(
            "local directive carries both user and group".into(),
        )),
        (Some(user), None) => {
            if user.name.is_empty() {
                return Err(MappingError::InvalidMapping(
                    "user directive has an empty name template".into(),
                ));
            }
            Ok(())
        }
        (None, Some(group)) => match (&group.id, &group.name, &group.domain) {
            (Some(_), None, None) => Ok(()),
            (None, Some(_), Some(domain)) => {
                if domain.id.is_none() && domain.name.is_none() {
                    return Err(MappingError::InvalidMapping(
                        "group domain reference carries neither id nor name".into(),
                    ));
                }
                Ok(())
            }
            _ => Err(MappingError::InvalidMapping(
                "group directive must carry either id or name with domain".into(),
            )),
        },
    }
}

fn validate_condition(condition: &RemoteCondition) -> Result<(), MappingError> {
    if condition.attribute.is_empty() {
        return Err(MappingError::InvalidMapping(
            "remote condition has an empty attribute type".into(),
        ));
    }
    if condition.any_one_of.is_some() && condition.not_any_of.is_some() {
        return Err(MappingError::InvalidMapping(format!(
            "condition on {} carries both any_one_of and not_any_of",
            condition.attribute
        )));
    }
    if condition.regex {
        let patterns = condition
            .any_one_of
            .as_ref()
            .or(condition.not_any_of.as_ref())
            .ok_or_else(|| {
                MappingError::InvalidMapping(format!(
                    "regex condition on {} carries no value list",
                    condition.attribute
                ))
            })?;
        for pattern in patterns {
            compile(pattern)?;
        }
    }
    Ok(())
}

/// Evaluate the mapping against the assertion.
pub fn evaluate(mapping: &Mapping, assertion: &Assertion) -> Result<MappedIdentity, MappingError> {
    validate(mapping)?;
    for rule in &mapping.rules {
        if let Some(captures) = match_conditions(&rule.remote, assertion)? {
            return render(&rule.local, &captures);
        }
    }
    Err(MappingError::NoRuleMatched)
}

/// Match all conditions of a rule, collecting positional captures.
///
/// `Ok(None)` means the rule does not match; condition and pattern errors
/// are reported as [`MappingError::InvalidMapping`].
fn match_conditions(
    conditions: &[RemoteCondition],
    assertion: &Assertion,
) -> Result<Option<Vec<String>>, MappingError> {
    let mut captures: Vec<String> = Vec::new();
    for condition in conditions {
        let values = assertion.get(&condition.attribute);
        match (&condition.any_one_of, &condition.not_any_of) {
            (Some(_), Some(_)) => {
                return Err(MappingError::InvalidMapping(format!(
                    "condition on {} carries both any_one_of and not_any_of",
                    condition.attribute
                )));
            }
            (Some(allowed), None) => {
                let Some(values) = values else {
                    return Ok(None);
                };
                if condition.regex {
                    match match_regex(allowed, values)? {
                        Some(matched) => captures.extend(matched),
                        None => return Ok(None),
                    }
                } else {
                    match values.iter().find(|value| allowed.contains(value)) {
                        Some(value) => captures.push(value.clone()),
                        None => return Ok(None),
                    }
                }
            }
            (None, Some(rejected)) => {
                if let Some(values) = values {
                    let hit = if condition.regex {
                        let patterns = compile_all(rejected)?;
                        values
                            .iter()
                            .any(|value| patterns.iter().any(|pattern| pattern.is_match(value)))
                    } else {
                        values.iter().any(|value| rejected.contains(value))
                    };
                    if hit {
                        return Ok(None);
                    }
                }
            }
            (None, None) => {
                match values.and_then(|values| values.iter().find(|value| !value.is_empty())) {
                    Some(value) => captures.push(value.clone()),
                    None => return Ok(None),
                }
            }
        }
    }
    Ok(Some(captures))
}

/// First assertion value matched by any of the patterns, expanded into its
/// capture groups (the full match when the pattern has no groups).
fn match_regex(
    patterns: &[String],
    values: &[String],
) -> Result<Option<Vec<String>>, MappingError> {
    let patterns = compile_all(patterns)?;
    for value in values {
        for pattern in &patterns {
            if let Some(caps) = pattern.captures(value) {
                if caps.len() > 1 {
                    return Ok(Some(
                        caps.iter()
                            .skip(1)
                            .map(|group| {
                                group.map(|m| m.as_str().to_string()).unwrap_or_default()
                            })
                            .collect(),
                    ));
                } else if let Some(full) = caps.get(0) {
                    return Ok(Some(vec![full.as_str().to_string()]));
                }
            }
        }
    }
    Ok(None)
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, MappingError> {
    patterns.iter().map(|pattern| compile(pattern)).collect()
}

fn compile(pattern: &str) -> Result<Regex, MappingError> {
    Regex::new(pattern).map_err(|err| {
        MappingError::InvalidMapping(format!("invalid pattern {pattern}: {err}"))
    })
}

fn render(local: &[LocalDirective], captures: &[String]) -> Result<MappedIdentity, MappingError> {
    let mut user_name: Option<String> = None;
    let mut groups: Vec<GroupRef> = Vec::new();
    for directive in local {
        if let Some(user) = &directive.user
            && user_name.is_none()
        {
            user_name = Some(substitute(&user.name, captures)?);
        }
        if let Some(group) = &directive.group {
            match (&group.id, &group.name, &group.domain) {
                (Some(id), _, _) => groups.push(GroupRef::Id(id.clone())),
                (None, Some(name), Some(domain)) => groups.push(GroupRef::Name {
                    name: name.clone(),
                    domain: domain.clone(),
                }),
                _ => {
                    return Err(MappingError::InvalidMapping(
                        "group directive must carry either id or name with domain".into(),
                    ));
                }
            }
        }
    }
    let user_name = user_name.ok_or_else(|| {
        MappingError::InvalidMapping("matched rule produces no user".into())
    })?;
    Ok(MappedIdentity {
        user_name,
        groups,
    })
}

/// Substitute `{N}` placeholders with positional captures. Braced content
/// that is not an index is emitted literally.
fn substitute(template: &str, captures: &[String]) -> Result<String, MappingError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start..];
        match after.find('}') {
            Some(end) => {
                let body = &after[1..end];
                if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) {
                    let index: usize = body.parse().map_err(|_| {
                        MappingError::InvalidMapping(format!(
                            "capture reference {{{body}}} is out of range"
                        ))
                    })?;
                    let capture = captures.get(index).ok_or_else(|| {
                        MappingError::InvalidMapping(format!(
                            "capture reference {{{index}}} is out of range, rule produced {} captures",
                            captures.len()
                        ))
                    })?;
                    out.push_str(capture);
                } else {
                    out.push_str(&after[..=end]);
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(after);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::federation::types::{
        DomainRef, GroupDirective, MappingRule, UserDirective,
    };

    fn mapping(rules: serde_json::Value) -> Mapping {
        Mapping {
            id: "m1".into(),
            rules: serde_json::from_value(rules).expect("valid rule document"),
        }
    }

    fn assertion(pairs: &[(&str, &[&str])]) -> Assertion {
        pairs
            .iter()
            .map(|(name, values)| {
                (
                    name.to_string(),
                    values.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_any_one_of_with_capture() {
        let mapping = mapping(serde_json::json!([{
            "local": [
                {"user": {"name": "{0}"}},
                {"group": {"id": "g1"}}
            ],
            "remote": [
                {"type": "openstack_user", "any_one_of": ["user1", "admin"]}
            ]
        }]));
        let identity = evaluate(&mapping, &assertion(&[("openstack_user", &["user1"])])).unwrap();
        assert_eq!("user1", identity.user_name);
        assert_eq!(vec![GroupRef::Id("g1".into())], identity.groups);
    }

    #[test]
    fn test_no_rule_matched_is_fail_closed() {
        let mapping = mapping(serde_json::json!([{
            "local": [{"user": {"name": "{0}"}}],
            "remote": [{"type": "openstack_user", "any_one_of": ["user1"]}]
        }]));
        assert!(matches!(
            evaluate(&mapping, &assertion(&[("openstack_user", &["mallory"])])),
            Err(MappingError::NoRuleMatched)
        ));
        assert!(matches!(
            evaluate(&mapping, &assertion(&[])),
            Err(MappingError::NoRuleMatched)
        ));
    }

    #[test]
    fn test_any_one_of_is_case_sensitive() {
        let mapping = mapping(serde_json::json!([{
            "local": [{"user": {"name": "{0}"}}],
            "remote": [{"type": "openstack_user", "any_one_of": ["User1"]}]
        }]));
        assert!(matches!(
            evaluate(&mapping, &assertion(&[("openstack_user", &["user1"])])),
            Err(MappingError::NoRuleMatched)
        ));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let mapping = mapping(serde_json::json!([
            {
                "local": [{"user": {"name": "first"}}],
                "remote": [{"type": "openstack_user"}]
            },
            {
                "local": [{"user": {"name": "second"}}],
                "remote": [{"type": "openstack_user"}]
            }
        ]));
        let identity = evaluate(&mapping, &assertion(&[("openstack_user", &["alice"])])).unwrap();
        assert_eq!("first", identity.user_name);
    }

    #[test]
    fn test_not_any_of_passes_on_absent_attribute() {
        let mapping = mapping(serde_json::json!([{
            "local": [{"user": {"name": "{0}"}}],
            "remote": [
                {"type": "openstack_user"},
                {"type": "blocked", "not_any_of": ["true"]}
            ]
        }]));
        let identity = evaluate(&mapping, &assertion(&[("openstack_user", &["alice"])])).unwrap();
        assert_eq!("alice", identity.user_name);
        // not_any_of contributes no capture, {0} is still the bare condition
        let denied = evaluate(
            &mapping,
            &assertion(&[("openstack_user", &["alice"]), ("blocked", &["true"])]),
        );
        assert!(matches!(denied, Err(MappingError::NoRuleMatched)));
    }

    #[test]
    fn test_all_conditions_must_match() {
        let mapping = mapping(serde_json::json!([{
            "local": [{"user": {"name": "{0}"}}],
            "remote": [
                {"type": "openstack_user", "any_one_of": ["alice"]},
                {"type": "openstack_roles", "any_one_of": ["operator"]}
            ]
        }]));
        assert!(matches!(
            evaluate(&mapping, &assertion(&[("openstack_user", &["alice"])])),
            Err(MappingError::NoRuleMatched)
        ));
        let identity = evaluate(
            &mapping,
            &assertion(&[
                ("openstack_user", &["alice"]),
                ("openstack_roles", &["operator", "reader"]),
            ]),
        )
        .unwrap();
        assert_eq!("alice", identity.user_name);
    }

    #[test]
    fn test_regex_capture_groups() {
        let mapping = mapping(serde_json::json!([{
            "local": [{"user": {"name": "{0}"}}],
            "remote": [
                {"type": "mail", "any_one_of": ["^(\\w+)@example\\.com$"], "regex": true}
            ]
        }]));
        let identity = evaluate(&mapping, &assertion(&[("mail", &["alice@example.com"])])).unwrap();
        assert_eq!("alice", identity.user_name);
    }

    #[test]
    fn test_regex_without_groups_captures_full_match() {
        let mapping = mapping(serde_json::json!([{
            "local": [{"user": {"name": "{0}"}}],
            "remote": [
                {"type": "mail", "any_one_of": ["\\w+@example\\.com"], "regex": true}
            ]
        }]));
        let identity = evaluate(&mapping, &assertion(&[("mail", &["bob@example.com"])])).unwrap();
        assert_eq!("bob@example.com", identity.user_name);
    }

    #[test]
    fn test_out_of_range_capture_is_invalid() {
        let mapping = mapping(serde_json::json!([{
            "local": [{"user": {"name": "{1}"}}],
            "remote": [{"type": "openstack_user", "any_one_of": ["alice"]}]
        }]));
        assert!(matches!(
            evaluate(&mapping, &assertion(&[("openstack_user", &["alice"])])),
            Err(MappingError::InvalidMapping(..))
        ));
    }

    #[test]
    fn test_static_template_needs_no_captures() {
        let mapping = mapping(serde_json::json!([{
            "local": [{"user": {"name": "service"}}],
            "remote": [{"type": "openstack_user", "any_one_of": ["alice"]}]
        }]));
        let identity = evaluate(&mapping, &assertion(&[("openstack_user", &["alice"])])).unwrap();
        assert_eq!("service", identity.user_name);
    }

    #[test]
    fn test_bare_condition_requires_non_empty_value() {
        let mapping = mapping(serde_json::json!([{
            "local": [{"user": {"name": "{0}"}}],
            "remote": [{"type": "openstack_user"}]
        }]));
        assert!(matches!(
            evaluate(&mapping, &assertion(&[("openstack_user", &["", ""])])),
            Err(MappingError::NoRuleMatched)
        ));
        let identity =
            evaluate(&mapping, &assertion(&[("openstack_user", &["", "carol"])])).unwrap();
        assert_eq!("carol", identity.user_name);
    }

    #[test]
    fn test_validate_rejects_malformed_documents() {
        // no rules at all
        assert!(matches!(
            validate(&Mapping {
                id: "m1".into(),
                rules: vec![]
            }),
            Err(MappingError::InvalidMapping(..))
        ));
        // group directive with a name but no domain
        let rule = MappingRule {
            local: vec![LocalDirective {
                user: Some(UserDirective { name: "{0}".into() }),
                group: Some(GroupDirective {
                    id: None,
                    name: Some("federated".into()),
                    domain: None,
                }),
            }],
            remote: vec![RemoteCondition {
                attribute: "openstack_user".into(),
                any_one_of: None,
                not_any_of: None,
                regex: false,
            }],
        };
        assert!(matches!(
            validate(&Mapping {
                id: "m1".into(),
                rules: vec![rule]
            }),
            Err(MappingError::InvalidMapping(..))
        ));
        // group by name with a domain reference is fine
        let rule = MappingRule {
            local: vec![
                LocalDirective {
                    user: Some(UserDirective { name: "{0}".into() }),
                    group: None,
                },
                LocalDirective {
                    user: None,
                    group: Some(GroupDirective {
                        id: None,
                        name: Some("federated".into()),
                        domain: Some(DomainRef {
                            id: None,
                            name: Some("Default".into()),
                        }),
                    }),
                },
            ],
            remote: vec![RemoteCondition {
                attribute: "openstack_user".into(),
                any_one_of: None,
                not_any_of: None,
                regex: false,
            }],
        };
        validate(&Mapping {
            id: "m1".into(),
            rules: vec![rule],
        })
        .unwrap();
    }

    #[test]
    fn test_invalid_regex_is_reported() {
        let mapping = mapping(serde_json::json!([{
            "local": [{"user": {"name": "{0}"}}],
            "remote": [{"type": "mail", "any_one_of": ["("], "regex": true}]
        }]));
        assert!(matches!(
            evaluate(&mapping, &assertion(&[("mail", &["x"])])),
            Err(MappingError::InvalidMapping(..))
        ));
    }
}
