//! Error types for rule construction

use crate::properties::PropertyKind;
use thiserror::Error;

/// Failure to build a configured check.
///
/// Never escapes configuration: the affected rule is skipped, or the
/// affected property keeps its default.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule '{rule}' declares no property '{property}'")]
    MissingProperty {
        rule: &'static str,
        property: String,
    },

    #[error("property '{property}' of rule '{rule}' is not of kind {expected}")]
    WrongKind {
        rule: &'static str,
        property: String,
        expected: PropertyKind,
    },

    #[error("invalid {kind} value '{value}' for property '{property}'")]
    InvalidValue {
        property: String,
        kind: PropertyKind,
        value: String,
    },

    #[error("invalid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("rule '{0}' has no implementation")]
    Unavailable(&'static str),
}
