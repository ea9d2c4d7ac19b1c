//! Typed rule properties
//!
//! Each rule declares its properties statically with a kind and a default
//! written as text. User values override defaults one property at a time;
//! a value that cannot be converted leaves the default in place.

use crate::error::RuleError;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Expected shape of a property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Integer,
    Text,
    Boolean,
    /// Regular expression
    Pattern,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Integer => write!(f, "integer"),
            PropertyKind::Text => write!(f, "text"),
            PropertyKind::Boolean => write!(f, "boolean"),
            PropertyKind::Pattern => write!(f, "pattern"),
        }
    }
}

impl PropertyKind {
    /// Convert textual input to a value of this kind.
    pub fn parse(self, property: &str, raw: &str) -> Result<PropertyValue, RuleError> {
        let invalid = || RuleError::InvalidValue {
            property: property.to_string(),
            kind: self,
            value: raw.to_string(),
        };
        match self {
            PropertyKind::Integer => raw
                .trim()
                .parse()
                .map(PropertyValue::Integer)
                .map_err(|_| invalid()),
            PropertyKind::Text => Ok(PropertyValue::Text(raw.to_string())),
            PropertyKind::Boolean => match raw.trim().to_lowercase().as_str() {
                "true" => Ok(PropertyValue::Boolean(true)),
                "false" => Ok(PropertyValue::Boolean(false)),
                _ => Err(invalid()),
            },
            PropertyKind::Pattern => Ok(PropertyValue::Pattern(Regex::new(raw)?)),
        }
    }

    /// Convert a settings value. Strings are canonical; numbers and booleans
    /// are accepted through their textual form.
    pub fn convert(self, property: &str, value: &Value) -> Result<PropertyValue, RuleError> {
        match value {
            Value::String(raw) => self.parse(property, raw),
            Value::Number(_) | Value::Bool(_) => self.parse(property, &value.to_string()),
            other => Err(RuleError::InvalidValue {
                property: property.to_string(),
                kind: self,
                value: other.to_string(),
            }),
        }
    }
}

/// A resolved property value
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Integer(i64),
    Text(String),
    Boolean(bool),
    Pattern(Regex),
}

/// Static declaration of one rule property
#[derive(Debug, Clone, Copy)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub kind: PropertyKind,
    /// Default value in its textual form
    pub default: &'static str,
    pub description: &'static str,
}

impl PropertyDescriptor {
    pub const fn new(
        name: &'static str,
        kind: PropertyKind,
        default: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            default,
            description,
        }
    }
}

/// Property values of one configured rule
#[derive(Debug, Clone)]
pub struct RuleProperties {
    rule: &'static str,
    values: BTreeMap<&'static str, PropertyValue>,
}

impl RuleProperties {
    /// Built-in defaults. Fails only when a declared default is itself invalid.
    pub fn defaults(
        rule: &'static str,
        declared: &'static [PropertyDescriptor],
    ) -> Result<Self, RuleError> {
        let mut values = BTreeMap::new();
        for property in declared {
            values.insert(property.name, property.kind.parse(property.name, property.default)?);
        }
        Ok(Self { rule, values })
    }

    /// Defaults overridden by user values. `enabled` and unknown names are
    /// skipped, unconvertible values keep their default.
    pub fn resolve(
        rule: &'static str,
        declared: &'static [PropertyDescriptor],
        overrides: &serde_json::Map<String, Value>,
    ) -> Result<Self, RuleError> {
        let mut properties = Self::defaults(rule, declared)?;

        for (name, value) in overrides {
            let Some(property) = declared.iter().find(|p| p.name == name) else {
                tracing::debug!(rule, property = %name, "ignoring unknown property");
                continue;
            };
            match property.kind.convert(property.name, value) {
                Ok(converted) => {
                    properties.values.insert(property.name, converted);
                }
                Err(err) => {
                    tracing::warn!(rule, property = property.name, "keeping default: {}", err);
                }
            }
        }

        Ok(properties)
    }

    pub fn rule(&self) -> &'static str {
        self.rule
    }

    fn get(&self, name: &str) -> Result<&PropertyValue, RuleError> {
        self.values.get(name).ok_or_else(|| RuleError::MissingProperty {
            rule: self.rule,
            property: name.to_string(),
        })
    }

    fn wrong_kind(&self, name: &str, expected: PropertyKind) -> RuleError {
        RuleError::WrongKind {
            rule: self.rule,
            property: name.to_string(),
            expected,
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, RuleError> {
        match self.get(name)? {
            PropertyValue::Integer(value) => Ok(*value),
            _ => Err(self.wrong_kind(name, PropertyKind::Integer)),
        }
    }

    pub fn text(&self, name: &str) -> Result<&str, RuleError> {
        match self.get(name)? {
            PropertyValue::Text(value) => Ok(value),
            _ => Err(self.wrong_kind(name, PropertyKind::Text)),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, RuleError> {
        match self.get(name)? {
            PropertyValue::Boolean(value) => Ok(*value),
            _ => Err(self.wrong_kind(name, PropertyKind::Boolean)),
        }
    }

    pub fn pattern(&self, name: &str) -> Result<&Regex, RuleError> {
        match self.get(name)? {
            PropertyValue::Pattern(value) => Ok(value),
            _ => Err(self.wrong_kind(name, PropertyKind::Pattern)),
        }
    }
}
