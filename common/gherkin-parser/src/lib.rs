//! Line-oriented Gherkin reader
//!
//! Produces [`gherkin_model::FeatureFile`] trees for the analysis engine.
//! Structural problems never surface as errors: the resulting tree simply
//! has no Feature, while every comment seen is kept.
//!
//! # Example
//!
//! ```
//! use gherkin_model::FeatureParser;
//! use gherkin_parser::GherkinParser;
//!
//! let text = "Feature: Login\n  Scenario: Valid user\n    Given a user\n";
//! let file = GherkinParser::new().parse("file:///login.feature", text).unwrap();
//! assert_eq!(file.feature.unwrap().scenarios.len(), 1);
//! ```

mod keywords;
mod reader;

pub use keywords::{HeaderKind, STEP_KEYWORDS};

use gherkin_model::{FeatureFile, FeatureParser, ParseError};
use std::io::Read;

/// English-keyword Gherkin parser
#[derive(Debug, Default, Clone, Copy)]
pub struct GherkinParser;

impl GherkinParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse in-memory text. Never fails.
    pub fn parse_str(&self, uri: &str, text: &str) -> FeatureFile {
        reader::read(uri, text)
    }

    /// Parse from a byte stream; only I/O and encoding problems are errors.
    pub fn parse_reader<R: Read>(&self, uri: &str, mut input: R) -> Result<FeatureFile, ParseError> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        let text = String::from_utf8(bytes)?;
        Ok(self.parse_str(uri, &text))
    }
}

impl FeatureParser for GherkinParser {
    fn parse(&self, uri: &str, text: &str) -> Result<FeatureFile, ParseError> {
        Ok(self.parse_str(uri, text))
    }
}
