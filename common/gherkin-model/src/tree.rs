//! Tree node definitions
//!
//! Every definition is owned by exactly one parent. Trees are built once
//! by a parser and then shared read-only (usually behind an `Arc`).

use crate::position::TextPosition;
use std::fmt;

/// Language reported when a document has no `# language:` directive
pub const DEFAULT_LANGUAGE: &str = "en";

/// Character that introduces a tag in source text
pub const TAG_MARKER: char = '@';

/// Root of a parsed document
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFile {
    /// Document identifier the tree was parsed from
    pub uri: String,
    /// Top-level Feature; `None` when the document has no valid one
    pub feature: Option<FeatureDefinition>,
    /// All comments of the document, in document order
    pub comments: Vec<Comment>,
    /// Detected language tag
    pub language: String,
}

impl FeatureFile {
    pub fn new(
        uri: impl Into<String>,
        feature: Option<FeatureDefinition>,
        comments: Vec<Comment>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            feature,
            comments,
            language: language.into(),
        }
    }

    /// A document with neither a Feature nor comments
    pub fn empty(uri: impl Into<String>) -> Self {
        Self::new(uri, None, Vec::new(), DEFAULT_LANGUAGE)
    }

    pub fn has_feature(&self) -> bool {
        self.feature.is_some()
    }
}

/// `Feature:` block
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDefinition {
    pub position: TextPosition,
    pub keyword: String,
    pub language: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<TagDefinition>,
    pub background: Option<BackgroundDefinition>,
    pub scenarios: Vec<ScenarioDefinition>,
    pub rules: Vec<RuleDefinition>,
}

impl FeatureDefinition {
    /// Scenarios declared directly under the Feature followed by those of
    /// every Rule section, in document order.
    pub fn all_scenarios(&self) -> impl Iterator<Item = &ScenarioDefinition> {
        self.scenarios
            .iter()
            .chain(self.rules.iter().flat_map(|rule| rule.scenarios.iter()))
    }
}

/// `Rule:` section grouping scenarios inside a Feature
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDefinition {
    pub position: TextPosition,
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<TagDefinition>,
    pub background: Option<BackgroundDefinition>,
    pub scenarios: Vec<ScenarioDefinition>,
}

/// `Scenario:` / `Scenario Outline:` block
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDefinition {
    pub position: TextPosition,
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<TagDefinition>,
    pub steps: Vec<StepDefinition>,
    pub examples: Vec<ExamplesDefinition>,
}

impl ScenarioDefinition {
    /// A scenario is an outline exactly when it carries Examples.
    pub fn is_outline(&self) -> bool {
        !self.examples.is_empty()
    }
}

/// `Background:` block
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundDefinition {
    pub position: TextPosition,
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub steps: Vec<StepDefinition>,
}

/// Grammatical role of a step keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeywordType {
    /// `Given`
    Context,
    /// `When`
    Action,
    /// `Then`
    Outcome,
    /// `And`, `But`
    Conjunction,
    /// `*` bullet steps
    Unknown,
}

impl StepKeywordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKeywordType::Context => "CONTEXT",
            StepKeywordType::Action => "ACTION",
            StepKeywordType::Outcome => "OUTCOME",
            StepKeywordType::Conjunction => "CONJUNCTION",
            StepKeywordType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for StepKeywordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single step line
#[derive(Debug, Clone, PartialEq)]
pub struct StepDefinition {
    pub position: TextPosition,
    /// Keyword as emitted by the parser, trailing space included
    pub keyword: String,
    pub keyword_type: StepKeywordType,
    pub text: String,
    pub data_table: Option<DataTableDefinition>,
    pub doc_string: Option<DocStringDefinition>,
}

impl StepDefinition {
    /// Keyword with surrounding whitespace removed, for display
    pub fn trimmed_keyword(&self) -> &str {
        self.keyword.trim()
    }
}

/// `@tag`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    /// Position of the marker character
    pub position: TextPosition,
    /// Tag name without the marker
    pub name: String,
}

impl TagDefinition {
    /// Build a tag from its source token; the leading marker is stripped.
    pub fn new(position: TextPosition, token: &str) -> Self {
        Self {
            position,
            name: token.trim_start_matches(TAG_MARKER).to_string(),
        }
    }
}

/// `Examples:` block of a scenario outline
#[derive(Debug, Clone, PartialEq)]
pub struct ExamplesDefinition {
    pub position: TextPosition,
    pub keyword: String,
    pub name: Option<String>,
    pub description: String,
    pub tags: Vec<TagDefinition>,
    /// Row 0 is the header; absent when no header row was written
    pub table: Option<DataTableDefinition>,
}

/// `| a | b |` rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTableDefinition {
    /// Position of the first row
    pub position: TextPosition,
    pub rows: Vec<Vec<String>>,
}

impl DataTableDefinition {
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// Fenced block of free text attached to a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocStringDefinition {
    pub position: TextPosition,
    /// Media type hint after the fence; empty when none was given
    pub content_type: String,
    pub content: String,
    /// Fence used in the source, e.g. `"""` or `` ``` ``
    pub delimiter: String,
}

/// `# ...` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Position of the marker character
    pub position: TextPosition,
    /// Raw line text; may include whitespace before the marker
    pub text: String,
}

impl Comment {
    /// Text from the marker to the end of the line
    pub fn marker_text(&self) -> &str {
        self.text.trim_start()
    }
}
