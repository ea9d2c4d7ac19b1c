//! Gherkin Lint - incremental analysis engine for feature files
//!
//! # Architecture
//!
//! ```text
//! text -> FeatureParser -> FeatureFile -> walk + active checks -> Issues
//!                              |
//!                              +-> tree store -> cross-file checks -> CrossFileIssues
//! ```
//!
//! Rules are described statically in [`registry::RULES`]. A
//! [`Configuration`] resolves which of them are active from user
//! [`Settings`], and the [`Analyzer`] runs them.
//!
//! # Example
//!
//! ```
//! use gherkin_lint::Analyzer;
//! use gherkin_parser::GherkinParser;
//! use std::sync::Arc;
//!
//! let analyzer = Analyzer::new(Arc::new(GherkinParser::new()));
//! let issues = analyzer.analyze("file:///a.feature", "Feature:\n");
//! assert_eq!(issues[0].rule_key, "feature-name-required");
//! ```

pub mod check;
pub mod checks;
pub mod config;
pub mod engine;
pub mod error;
pub mod issue;
pub mod properties;
pub mod registry;
pub mod settings;
pub mod severity;
pub mod visitor;
pub mod walker;

pub use check::{run_check, Check, CheckContext, CrossFileCheck};
pub use config::{ActiveRule, Configuration};
pub use engine::{Analyzer, CrossFileFindings};
pub use error::RuleError;
pub use issue::{CrossFileIssue, Issue};
pub use properties::{PropertyDescriptor, PropertyKind, PropertyValue, RuleProperties};
pub use registry::{
    descriptor, export_descriptors, severity_of, RuleDescriptor, RuleFactory, EXCLUDED_RULE,
    PARSE_ERROR_RULE, RULES,
};
pub use settings::{RuleSettings, Settings};
pub use severity::Severity;
pub use visitor::Visitor;
pub use walker::walk;
