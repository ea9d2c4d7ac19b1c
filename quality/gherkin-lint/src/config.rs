//! Rule activation
//!
//! A [`Configuration`] is resolved once from optional [`Settings`] and then
//! shared read-only. It keeps a recipe per active rule (descriptor plus
//! resolved properties) and builds fresh check instances on demand, so
//! concurrent analyses never share check state.

use crate::check::{Check, CrossFileCheck};
use crate::error::RuleError;
use crate::properties::RuleProperties;
use crate::registry::{RuleDescriptor, RuleFactory, EXCLUDED_RULE, RULES};
use crate::settings::Settings;
use std::collections::BTreeSet;

/// A rule that passed configuration, ready to be instantiated
#[derive(Debug, Clone)]
pub struct ActiveRule {
    pub descriptor: &'static RuleDescriptor,
    pub properties: RuleProperties,
}

impl ActiveRule {
    pub fn key(&self) -> &'static str {
        self.descriptor.key
    }

    fn build_check(&self) -> Option<Result<Box<dyn Check>, RuleError>> {
        match self.descriptor.factory {
            RuleFactory::PerFile(build) => Some(build(&self.properties)),
            _ => None,
        }
    }

    fn build_cross_file_check(&self) -> Option<Result<Box<dyn CrossFileCheck>, RuleError>> {
        match self.descriptor.factory {
            RuleFactory::CrossFile(build) => Some(build(&self.properties)),
            _ => None,
        }
    }

    /// Pair `properties` with `descriptor` if the rule can be built with them.
    fn activate(
        descriptor: &'static RuleDescriptor,
        properties: RuleProperties,
    ) -> Result<Self, RuleError> {
        let active = Self {
            descriptor,
            properties,
        };
        active.try_instantiate()?;
        Ok(active)
    }

    /// Build once to make sure the rule can be instantiated at all.
    fn try_instantiate(&self) -> Result<(), RuleError> {
        match self.descriptor.factory {
            RuleFactory::PerFile(build) => build(&self.properties).map(drop),
            RuleFactory::CrossFile(build) => build(&self.properties).map(drop),
            RuleFactory::Placeholder => Err(RuleError::Unavailable(self.descriptor.key)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Configuration {
    rules: Vec<ActiveRule>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::from_settings(None)
    }
}

impl Configuration {
    /// Resolve the active rules. Never fails: a rule that cannot be built
    /// is left out.
    pub fn from_settings(settings: Option<&Settings>) -> Self {
        let mut rules = Vec::new();

        for descriptor in RULES {
            let rule_settings = settings.and_then(|s| s.rule(descriptor.key));
            let enabled = rule_settings
                .and_then(|rule| rule.enabled)
                .unwrap_or(descriptor.default_enabled);
            if !enabled || descriptor.key == EXCLUDED_RULE {
                continue;
            }

            let overridden = match rule_settings {
                Some(rule) => RuleProperties::resolve(
                    descriptor.key,
                    descriptor.properties,
                    &rule.properties,
                ),
                None => RuleProperties::defaults(descriptor.key, descriptor.properties),
            }
            .and_then(|properties| ActiveRule::activate(descriptor, properties));

            let active = match overridden {
                Ok(active) => active,
                Err(err) if rule_settings.is_some() => {
                    // An override converted but was rejected by the check
                    tracing::warn!(rule = descriptor.key, "ignoring property overrides: {}", err);
                    let defaults = RuleProperties::defaults(descriptor.key, descriptor.properties)
                        .and_then(|properties| ActiveRule::activate(descriptor, properties));
                    match defaults {
                        Ok(active) => active,
                        Err(err) => {
                            tracing::warn!(rule = descriptor.key, "skipping rule: {}", err);
                            continue;
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(rule = descriptor.key, "skipping rule: {}", err);
                    continue;
                }
            };
            rules.push(active);
        }

        tracing::info!(active = rules.len(), "configuration resolved");
        Self { rules }
    }

    pub fn rules(&self) -> &[ActiveRule] {
        &self.rules
    }

    pub fn active_rule_keys(&self) -> BTreeSet<&'static str> {
        self.rules.iter().map(ActiveRule::key).collect()
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.rules.iter().any(|rule| rule.key() == key)
    }

    pub fn rule(&self, key: &str) -> Option<&ActiveRule> {
        self.rules.iter().find(|rule| rule.key() == key)
    }

    /// Fresh per-file checks, in registry order
    pub fn checks(&self) -> Vec<Box<dyn Check>> {
        self.rules
            .iter()
            .filter_map(|rule| match rule.build_check()? {
                Ok(check) => Some(check),
                Err(err) => {
                    tracing::warn!(rule = rule.key(), "failed to build check: {}", err);
                    None
                }
            })
            .collect()
    }

    /// Fresh cross-file checks, in registry order
    pub fn cross_file_checks(&self) -> Vec<Box<dyn CrossFileCheck>> {
        self.rules
            .iter()
            .filter_map(|rule| match rule.build_cross_file_check()? {
                Ok(check) => Some(check),
                Err(err) => {
                    tracing::warn!(rule = rule.key(), "failed to build check: {}", err);
                    None
                }
            })
            .collect()
    }
}
