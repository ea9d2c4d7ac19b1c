//! Gherkin document tree model
//!
//! Immutable value types describing one parsed feature file, plus the
//! contract a grammar parser fulfils to produce them.
//!
//! ```text
//! FeatureFile
//! ├── Feature (optional)
//! │   ├── Tags
//! │   ├── Background -> Steps
//! │   ├── Scenarios -> Tags, Steps, Examples
//! │   └── Rules -> Tags, Background, Scenarios
//! └── Comments
//! ```
//!
//! A file without a valid top-level document is represented by
//! `feature: None`; that is not an error.

pub mod parser;
pub mod position;
pub mod tree;

pub use parser::{FeatureParser, ParseError};
pub use position::TextPosition;
pub use tree::{
    BackgroundDefinition, Comment, DataTableDefinition, DocStringDefinition,
    ExamplesDefinition, FeatureDefinition, FeatureFile, RuleDefinition, ScenarioDefinition,
    StepDefinition, StepKeywordType, TagDefinition, DEFAULT_LANGUAGE, TAG_MARKER,
};
