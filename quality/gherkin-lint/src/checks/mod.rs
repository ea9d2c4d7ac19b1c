//! Built-in checks
//!
//! Each check exposes its registered key as `KEY` and a `build` function
//! that turns resolved properties into a fresh instance.

mod comments;
mod naming;
mod size;
mod steps;
mod structure;
mod tags;
mod text;
mod unique;

pub use comments::{CommentConvention, TodoTaggedComment};
pub use naming::{FeatureNameRequired, NameLength, ScenarioNameRequired};
pub use size::{MaxScenarios, MaxSteps};
pub use steps::{MissingStepType, StarStepPrefix};
pub use structure::{ExamplesTableRequired, FeatureFileRequired};
pub use tags::{AllowedTags, TagNameConvention};
pub use text::{LineLength, TrailingWhitespace};
pub use unique::{UniqueFeatureName, UniqueScenarioName};

use crate::error::RuleError;
use crate::properties::RuleProperties;

/// Read an integer limit, rejecting negative values
pub(crate) fn limit(properties: &RuleProperties, name: &str) -> Result<usize, RuleError> {
    let value = properties.integer(name)?;
    usize::try_from(value).map_err(|_| RuleError::InvalidValue {
        property: name.to_string(),
        kind: crate::properties::PropertyKind::Integer,
        value: value.to_string(),
    })
}
