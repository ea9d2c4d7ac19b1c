//! Static rule descriptor table
//!
//! Every available rule is described once here: key, default state,
//! severity, declared properties and how to build it.

use crate::check::{Check, CrossFileCheck};
use crate::checks::*;
use crate::error::RuleError;
use crate::properties::{PropertyDescriptor, PropertyKind, RuleProperties};
use crate::severity::Severity;
use serde_json::{json, Map, Value};
use std::fmt;

/// Key that is never activated, whatever the settings say
pub const EXCLUDED_RULE: &str = "spelling";

/// Key of the synthetic issue reported when a document cannot be read
pub const PARSE_ERROR_RULE: &str = "parse-error";

/// How a rule is instantiated
#[derive(Clone, Copy)]
pub enum RuleFactory {
    PerFile(fn(&RuleProperties) -> Result<Box<dyn Check>, RuleError>),
    CrossFile(fn(&RuleProperties) -> Result<Box<dyn CrossFileCheck>, RuleError>),
    /// Declared but not implemented
    Placeholder,
}

impl fmt::Debug for RuleFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleFactory::PerFile(_) => write!(f, "PerFile"),
            RuleFactory::CrossFile(_) => write!(f, "CrossFile"),
            RuleFactory::Placeholder => write!(f, "Placeholder"),
        }
    }
}

#[derive(Debug)]
pub struct RuleDescriptor {
    pub key: &'static str,
    pub description: &'static str,
    pub default_enabled: bool,
    pub severity: Severity,
    pub properties: &'static [PropertyDescriptor],
    pub factory: RuleFactory,
}

impl RuleDescriptor {
    pub fn is_cross_file(&self) -> bool {
        matches!(self.factory, RuleFactory::CrossFile(_))
    }

    /// `{enabled, severity, <property defaults>}`
    pub fn export(&self) -> Value {
        let mut entry = Map::new();
        entry.insert("enabled".to_string(), json!(self.default_enabled));
        entry.insert("severity".to_string(), json!(self.severity));
        for property in self.properties {
            entry.insert(property.name.to_string(), json!(property.default));
        }
        Value::Object(entry)
    }
}

const NO_PROPERTIES: &[PropertyDescriptor] = &[];

pub static RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        key: FeatureFileRequired::KEY,
        description: "Every file defines a valid Feature",
        default_enabled: true,
        severity: Severity::Error,
        properties: NO_PROPERTIES,
        factory: RuleFactory::PerFile(FeatureFileRequired::build),
    },
    RuleDescriptor {
        key: FeatureNameRequired::KEY,
        description: "Features have a name",
        default_enabled: true,
        severity: Severity::Error,
        properties: NO_PROPERTIES,
        factory: RuleFactory::PerFile(FeatureNameRequired::build),
    },
    RuleDescriptor {
        key: ScenarioNameRequired::KEY,
        description: "Scenarios have a name",
        default_enabled: true,
        severity: Severity::Error,
        properties: NO_PROPERTIES,
        factory: RuleFactory::PerFile(ScenarioNameRequired::build),
    },
    RuleDescriptor {
        key: NameLength::KEY,
        description: "Names stay below a maximum length",
        default_enabled: true,
        severity: Severity::Warning,
        properties: &[PropertyDescriptor::new(
            "maxLength",
            PropertyKind::Integer,
            "80",
            "Maximum number of characters in a name",
        )],
        factory: RuleFactory::PerFile(NameLength::build),
    },
    RuleDescriptor {
        key: MaxScenarios::KEY,
        description: "Features hold a limited number of scenarios",
        default_enabled: true,
        severity: Severity::Warning,
        properties: &[PropertyDescriptor::new(
            "max",
            PropertyKind::Integer,
            "20",
            "Maximum number of scenarios per feature",
        )],
        factory: RuleFactory::PerFile(MaxScenarios::build),
    },
    RuleDescriptor {
        key: MaxSteps::KEY,
        description: "Scenarios and backgrounds hold a limited number of steps",
        default_enabled: true,
        severity: Severity::Warning,
        properties: &[PropertyDescriptor::new(
            "max",
            PropertyKind::Integer,
            "10",
            "Maximum number of steps per scenario",
        )],
        factory: RuleFactory::PerFile(MaxSteps::build),
    },
    RuleDescriptor {
        key: TagNameConvention::KEY,
        description: "Tag names follow a naming convention",
        default_enabled: true,
        severity: Severity::Information,
        properties: &[PropertyDescriptor::new(
            "format",
            PropertyKind::Pattern,
            "^[a-z][-a-z0-9]*$",
            "Regular expression tag names must match",
        )],
        factory: RuleFactory::PerFile(TagNameConvention::build),
    },
    RuleDescriptor {
        key: AllowedTags::KEY,
        description: "Only allowed tags are used",
        default_enabled: false,
        severity: Severity::Warning,
        properties: &[PropertyDescriptor::new(
            "allowedTags",
            PropertyKind::Text,
            "smoke,nonregression",
            "Comma-separated list of allowed tags",
        )],
        factory: RuleFactory::PerFile(AllowedTags::build),
    },
    RuleDescriptor {
        key: StarStepPrefix::KEY,
        description: "Steps use a typed keyword instead of *",
        default_enabled: true,
        severity: Severity::Information,
        properties: NO_PROPERTIES,
        factory: RuleFactory::PerFile(StarStepPrefix::build),
    },
    RuleDescriptor {
        key: CommentConvention::KEY,
        description: "Comments start with '# '",
        default_enabled: true,
        severity: Severity::Hint,
        properties: NO_PROPERTIES,
        factory: RuleFactory::PerFile(CommentConvention::build),
    },
    RuleDescriptor {
        key: TodoTaggedComment::KEY,
        description: "TODO and FIXME comments are tracked",
        default_enabled: true,
        severity: Severity::Information,
        properties: NO_PROPERTIES,
        factory: RuleFactory::PerFile(TodoTaggedComment::build),
    },
    RuleDescriptor {
        key: TrailingWhitespace::KEY,
        description: "Lines have no trailing whitespace",
        default_enabled: true,
        severity: Severity::Hint,
        properties: NO_PROPERTIES,
        factory: RuleFactory::PerFile(TrailingWhitespace::build),
    },
    RuleDescriptor {
        key: LineLength::KEY,
        description: "Lines stay below a maximum length",
        default_enabled: false,
        severity: Severity::Information,
        properties: &[PropertyDescriptor::new(
            "maxLength",
            PropertyKind::Integer,
            "120",
            "Maximum number of characters per line",
        )],
        factory: RuleFactory::PerFile(LineLength::build),
    },
    RuleDescriptor {
        key: ExamplesTableRequired::KEY,
        description: "Outlines have examples with data rows",
        default_enabled: true,
        severity: Severity::Error,
        properties: NO_PROPERTIES,
        factory: RuleFactory::PerFile(ExamplesTableRequired::build),
    },
    RuleDescriptor {
        key: MissingStepType::KEY,
        description: "And/But steps follow a typed step",
        default_enabled: false,
        severity: Severity::Warning,
        properties: NO_PROPERTIES,
        factory: RuleFactory::PerFile(MissingStepType::build),
    },
    RuleDescriptor {
        key: UniqueFeatureName::KEY,
        description: "Feature names are unique across files",
        default_enabled: true,
        severity: Severity::Warning,
        properties: NO_PROPERTIES,
        factory: RuleFactory::CrossFile(UniqueFeatureName::build),
    },
    RuleDescriptor {
        key: UniqueScenarioName::KEY,
        description: "Scenario names are unique across files",
        default_enabled: true,
        severity: Severity::Warning,
        properties: NO_PROPERTIES,
        factory: RuleFactory::CrossFile(UniqueScenarioName::build),
    },
    RuleDescriptor {
        key: EXCLUDED_RULE,
        description: "Spelling of names and steps",
        default_enabled: false,
        severity: Severity::Information,
        properties: &[PropertyDescriptor::new(
            "language",
            PropertyKind::Text,
            "en_US",
            "Dictionary language",
        )],
        factory: RuleFactory::Placeholder,
    },
];

pub fn descriptor(key: &str) -> Option<&'static RuleDescriptor> {
    RULES.iter().find(|rule| rule.key == key)
}

/// Severity for a rule key; unknown keys are warnings.
pub fn severity_of(key: &str) -> Severity {
    if key == PARSE_ERROR_RULE {
        return Severity::Error;
    }
    descriptor(key).map(|rule| rule.severity).unwrap_or_default()
}

/// Descriptors offered to users, the excluded rule left out
pub fn exported_rules() -> impl Iterator<Item = &'static RuleDescriptor> {
    RULES.iter().filter(|rule| rule.key != EXCLUDED_RULE)
}

/// `{<key>: {enabled, severity, <property defaults>}}` for every exported rule
pub fn export_descriptors() -> Value {
    let rules: Map<String, Value> = exported_rules()
        .map(|rule| (rule.key.to_string(), rule.export()))
        .collect();
    Value::Object(rules)
}
