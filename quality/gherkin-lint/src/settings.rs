//! User settings
//!
//! Shape: `{ "rules": { "<key>": { "enabled": bool, "<property>": "<value>" } } }`,
//! optionally nested under a `"gherkin"` section. Parsing is lenient: a
//! malformed entry is dropped on its own and never invalidates the rest.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Section name editors usually nest the settings under
pub const SETTINGS_SECTION: &str = "gherkin";

/// Settings for one rule key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSettings {
    /// Explicit activation; `None` keeps the default
    pub enabled: Option<bool>,
    /// Raw property values, converted later against the rule's declaration
    pub properties: Map<String, Value>,
}

impl RuleSettings {
    fn from_value(key: &str, value: &Value) -> Option<Self> {
        let Value::Object(entries) = value else {
            tracing::warn!(rule = key, "ignoring rule settings that are not an object");
            return None;
        };

        let mut settings = RuleSettings::default();
        for (name, value) in entries {
            if name == "enabled" {
                settings.enabled = parse_flag(value);
                if settings.enabled.is_none() {
                    tracing::warn!(rule = key, "ignoring non-boolean 'enabled' value: {}", value);
                }
            } else {
                settings.properties.insert(name.clone(), value.clone());
            }
        }
        Some(settings)
    }
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub rules: BTreeMap<String, RuleSettings>,
}

impl Settings {
    /// Read settings leniently from JSON
    pub fn from_value(value: &Value) -> Self {
        let root = value
            .get(SETTINGS_SECTION)
            .filter(|section| section.is_object())
            .unwrap_or(value);

        let mut settings = Settings::default();
        let Some(rules) = root.get("rules") else {
            return settings;
        };
        let Value::Object(rules) = rules else {
            tracing::warn!("ignoring 'rules' settings that are not an object");
            return settings;
        };

        for (key, value) in rules {
            if let Some(rule) = RuleSettings::from_value(key, value) {
                settings.rules.insert(key.clone(), rule);
            }
        }
        settings
    }

    pub fn rule(&self, key: &str) -> Option<&RuleSettings> {
        self.rules.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Entries of `overrides` replace entries of `self` with the same key.
    pub fn overridden_by(mut self, overrides: &Settings) -> Settings {
        for (key, rule) in &overrides.rules {
            self.rules.insert(key.clone(), rule.clone());
        }
        self
    }
}
